//! Error types for schoology-mcp.

use thiserror::Error;

/// Library-level error type for schoology-mcp operations.
#[derive(Error, Debug)]
pub enum SchoologyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(
        "Authentication failed (HTTP {status}): the session cookie was rejected. \
         Copy a fresh cookie from a logged-in browser session into SCHOOLOGY_COOKIE."
    )]
    Authentication { status: u16 },

    #[error("Request failed: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Response unreadable: {0}")]
    Parse(String),

    #[error("Failed to serialize result: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl SchoologyError {
    /// Transport failure that never produced an HTTP status.
    pub fn network(message: impl Into<String>) -> Self {
        SchoologyError::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status carried by the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            SchoologyError::Authentication { status } => Some(*status),
            SchoologyError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the operator has to refresh the session cookie.
    pub fn is_authentication(&self) -> bool {
        matches!(self, SchoologyError::Authentication { .. })
    }
}

/// Result type alias for schoology-mcp operations.
pub type Result<T> = std::result::Result<T, SchoologyError>;
