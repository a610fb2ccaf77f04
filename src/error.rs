//! Error types for the fallible edges of the cleaner
//!
//! The cleaning stages themselves never fail. Errors only come from loading
//! configuration and from reading raw MIME messages.

use thiserror::Error;

/// Errors that can occur around body cleaning
#[derive(Error, Debug)]
pub enum CleanError {
    /// Configuration JSON could not be parsed
    #[error("Failed to parse cleaner configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration parsed but holds an unusable value
    #[error("Invalid cleaner configuration for {field}: {details}")]
    InvalidConfig { field: String, details: String },

    /// Failed to parse the MIME structure of a message
    #[error("Failed to parse message: {0}")]
    Mime(String),

    /// Message has neither a text nor an HTML part
    #[error("Message has no readable body")]
    MissingBody,
}

/// Result type for cleaner operations
pub type Result<T> = std::result::Result<T, CleanError>;
