//! Error handling module

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BraviaError {
    /// Transport failure: unreachable host, timeout, TLS, body read
    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    /// The device answered with something we cannot interpret
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for BraviaError {
    fn from(e: serde_json::Error) -> Self {
        BraviaError::Protocol(format!("invalid JSON: {}", e))
    }
}

impl From<config::ConfigError> for BraviaError {
    fn from(e: config::ConfigError) -> Self {
        BraviaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BraviaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_is_protocol() {
        let err: BraviaError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(matches!(err, BraviaError::Protocol(_)));
        assert!(err.to_string().starts_with("Protocol error: invalid JSON"));
    }

    #[test]
    fn test_unknown_command_message() {
        let err = BraviaError::UnknownCommand("Mute".to_string());
        assert_eq!(err.to_string(), "Unknown command: Mute");
    }
}
