//! Error type definitions.
//!
//! Startup failures get dedicated error types. Per-item failures during a run
//! are never errors: they surface as `Failed` verdicts on the item itself, so
//! one bad URL or host never aborts a batch.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
///
/// These are fatal at startup; nothing in this enum is produced once the
/// pipeline is running.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// A configured reject pattern failed to compile.
    #[error("Invalid reject pattern '{pattern}': {message}")]
    RejectPatternError {
        /// The offending pattern as configured.
        pattern: String,
        /// The regex compiler's diagnostic.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_pattern_error_display() {
        let err = InitializationError::RejectPatternError {
            pattern: "[".to_string(),
            message: "unclosed character class".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("["));
        assert!(msg.contains("unclosed character class"));
    }
}
