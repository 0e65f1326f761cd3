//! Configuration parsing errors.

use thiserror::Error;

/// Errors from parsing the server-seeded initial-state bag.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is absent from the bag.
    #[error("Missing required config field: {0}")]
    MissingField(&'static str),

    /// A field is present but has the wrong shape.
    #[error("Invalid config field {field}: {reason}")]
    InvalidField {
        /// The offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A scope string outside the closed v2 set.
    #[error("Unknown scope: {0}")]
    UnknownScope(String),
}
