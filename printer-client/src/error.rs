//! Error types for the printer client

use std::time::Duration;
use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Connection refused/reset, DNS failure, or the reply could not be read
    #[error("Unreachable: {0}")]
    Unreachable(String),

    /// No complete reply within the configured timeout
    #[error("Timeout after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Invalid target configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The HTTP client could not be constructed
    #[error("Client error: {0}")]
    Client(String),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
