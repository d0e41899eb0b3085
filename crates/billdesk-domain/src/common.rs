//! Shared traits for billing records.

/// Exposes the stable key a record is stored under.
pub trait Identifiable {
    fn key(&self) -> &str;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}
