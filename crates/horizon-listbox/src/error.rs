//! Error types for list box operations.

use crate::model::RowId;

/// Result type alias for list box operations.
pub type Result<T> = std::result::Result<T, ListBoxError>;

/// Errors reported by the list box.
///
/// Row-addressed operations reject handles that do not name a live row of the
/// list box they are passed to; such calls leave the list box untouched.
#[derive(Debug, thiserror::Error)]
pub enum ListBoxError {
    /// The row was removed or belongs to another list box.
    #[error("row {0:?} does not belong to this list box")]
    UnknownRow(RowId),

    /// Configuration text could not be parsed.
    #[error("failed to parse list box configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration value is out of range.
    #[error("invalid value for '{field}': {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },
}

impl ListBoxError {
    /// Create a configuration value error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}
