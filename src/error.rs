//! Error types for rpc-repl
//!
//! This module defines the error types used throughout the application.
//! Every variant is recoverable at the line level: the REPL reports it and
//! keeps reading.

use thiserror::Error;

/// Result type alias for rpc-repl
pub type Result<T> = std::result::Result<T, ReplError>;

/// Main error type for rpc-repl
#[derive(Error, Debug)]
pub enum ReplError {
    /// The first token of a line names no registered command
    #[error("{0}: unknown command")]
    UnknownCommand(String),

    /// A mandatory argument is missing; wraps the argument's name
    #[error("{0}: argument required")]
    ArgumentRequired(String),

    /// A known command received a value it cannot resolve
    #[error("{0}: unknown target")]
    UnknownTarget(String),

    /// The operation needs a selected package
    #[error("package unselected")]
    PackageUnselected,

    /// The operation needs a selected service
    #[error("service unselected")]
    ServiceUnselected,

    /// A request body was rejected before sending
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Line editor errors
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_messages() {
        assert_eq!(
            ReplError::ArgumentRequired("service name".to_string()).to_string(),
            "service name: argument required"
        );
        assert_eq!(
            ReplError::UnknownTarget("bogus".to_string()).to_string(),
            "bogus: unknown target"
        );
        assert_eq!(
            ReplError::UnknownCommand("frobnicate".to_string()).to_string(),
            "frobnicate: unknown command"
        );
    }
}
