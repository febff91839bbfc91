/// Tri-state field update used by presence-based partial updates.
///
/// The default merge policy (timetable, assignments, exams) represents a
/// patch field as plain `Option<T>`: JSON null and an absent key both mean
/// "leave unchanged". The note store instead treats a *present* key as
/// authoritative, which needs three states: absent, explicit null, value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Key absent: keep the current value.
    #[default]
    Keep,
    /// Key present with an explicit null.
    Clear,
    /// Key present with a value.
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Build from the double-`Option` shape produced by a presence-tracking
    /// deserializer: outer None = absent, inner None = explicit null.
    pub fn from_double_option(v: Option<Option<T>>) -> Self {
        match v {
            None => FieldUpdate::Keep,
            Some(None) => FieldUpdate::Clear,
            Some(Some(value)) => FieldUpdate::Set(value),
        }
    }

    /// Overwrite `slot` unless the field should be kept.
    pub fn apply_to(self, slot: &mut T) {
        if let FieldUpdate::Set(v) = self {
            *slot = v;
        }
    }
}
