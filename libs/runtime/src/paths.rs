use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

/// Resolve the server home directory into an absolute path, optionally
/// creating it.
///
/// - `None` or an empty string selects the platform default:
///   `%APPDATA%\<subdir>` on Windows, `$HOME/<subdir>` elsewhere.
/// - A leading `~` is expanded against the user's home directory.
/// - Relative paths are resolved against the current working directory.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let raw = configured.filter(|s| !s.trim().is_empty());

    let path = match raw {
        Some(p) => expand_tilde(&p)?,
        None => user_home_dir()?.join(default_subdir),
    };

    let path = if path.is_relative() {
        std::env::current_dir()
            .context("cannot determine current directory")?
            .join(path)
    } else {
        path
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("failed to create home dir {}", path.display()))?;
    }

    Ok(path)
}

fn user_home_dir() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    let var = "APPDATA";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";

    std::env::var_os(var)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("{} is not set", var))
}

fn expand_tilde(path: &str) -> Result<PathBuf> {
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        return Ok(user_home_dir()?.join(rest));
    }
    if path == "~" {
        return user_home_dir();
    }
    Ok(PathBuf::from(path))
}
