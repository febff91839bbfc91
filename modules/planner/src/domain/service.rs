use chrono::Duration;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::DatabaseConnection;

use crate::domain::error::PlannerError;

/// Domain service for the four owned resource stores.
///
/// Every operation takes the owner identity as its first argument; there is
/// no ambient current-user state anywhere below the REST extractors.
pub struct Service {
    db: DatabaseConnection,
    config: ServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Length of the "upcoming" window for assignments and exams, in days.
    pub upcoming_window_days: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            upcoming_window_days: 7,
        }
    }
}

impl Service {
    pub fn new(db: DatabaseConnection, config: ServiceConfig) -> Self {
        Self { db, config }
    }

    pub(crate) fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub(crate) fn upcoming_window(&self) -> Duration {
        Duration::days(self.config.upcoming_window_days)
    }
}

pub(crate) fn internal(e: impl std::fmt::Display) -> PlannerError {
    PlannerError::internal(e.to_string())
}

// --- shared validation helpers ---

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid time regex"));

const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Required text field: non-empty after trimming, bounded length.
pub(crate) fn require_text(field: &str, value: &str, max: usize) -> Result<(), PlannerError> {
    if value.trim().is_empty() {
        return Err(PlannerError::validation(field, "must not be empty"));
    }
    check_len(field, value, max)
}

/// Optional text field: bounded length only.
pub(crate) fn check_len(field: &str, value: &str, max: usize) -> Result<(), PlannerError> {
    if value.len() > max {
        return Err(PlannerError::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// 24h "HH:MM" clock time.
pub(crate) fn check_time(field: &str, value: &str) -> Result<(), PlannerError> {
    if !TIME_RE.is_match(value) {
        return Err(PlannerError::validation(field, "must be HH:MM"));
    }
    Ok(())
}

/// Day-of-week token as stored, e.g. "Monday".
pub(crate) fn check_day(field: &str, value: &str) -> Result<(), PlannerError> {
    if !DAYS.contains(&value) {
        return Err(PlannerError::validation(
            field,
            "must be a day of the week, e.g. Monday",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_shape() {
        assert!(check_time("start_time", "09:00").is_ok());
        assert!(check_time("start_time", "23:59").is_ok());
        assert!(check_time("start_time", "00:00").is_ok());
        assert!(check_time("start_time", "24:00").is_err());
        assert!(check_time("start_time", "9:00").is_err());
        assert!(check_time("start_time", "09:60").is_err());
        assert!(check_time("start_time", "0900").is_err());
    }

    #[test]
    fn day_tokens() {
        assert!(check_day("day", "Monday").is_ok());
        assert!(check_day("day", "Sunday").is_ok());
        assert!(check_day("day", "monday").is_err());
        assert!(check_day("day", "Moonday").is_err());
    }

    #[test]
    fn text_bounds() {
        assert!(require_text("title", "Essay", 200).is_ok());
        assert!(require_text("title", "   ", 200).is_err());
        assert!(require_text("title", &"x".repeat(201), 200).is_err());
        assert!(check_len("room", &"x".repeat(51), 50).is_err());
    }
}
