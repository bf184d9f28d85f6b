//! Error types for diagram configuration and surface setup

use thiserror::Error;

/// Failures that can occur before any splitting happens.
///
/// The split engine itself has no error path: stale disc ids and malformed
/// depth input both degrade to no-ops.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("config parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("surface error: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, SplitError>;

impl SplitError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    pub fn surface(message: impl Into<String>) -> Self {
        Self::Surface(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SplitError::invalid_params("steps must be positive");
        assert_eq!(err.to_string(), "invalid params: steps must be positive");

        let err = SplitError::surface("no 2d context");
        assert_eq!(err.to_string(), "surface error: no 2d context");
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<u32>("not: [a number").unwrap_err();
        let err: SplitError = yaml_err.into();
        assert!(err.to_string().starts_with("config parse error"));
    }
}
