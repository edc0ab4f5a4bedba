use std::time::Duration;

use thiserror::Error;

/// Everything that can go wrong while gathering activity. Apart from [ActivityError::InvalidDate]
/// these are recovered from as close to the failing call as possible and only logged.
#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("Invalid date format {0:?}. Use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("{0}")]
    Configuration(String),

    #[error("Unexpected response from {context}: {message}")]
    Validation { context: String, message: String },

    #[error("HTTP {status} from {domain}: {body}")]
    Http {
        domain: String,
        status: u16,
        body: String,
    },

    #[error("Request to {target} failed: {message}")]
    Transport { target: String, message: String },

    #[error("`{command}` failed: {message}")]
    Subprocess { command: String, message: String },

    #[error("{target} did not finish within {timeout:?}")]
    Timeout { target: String, timeout: Duration },
}
