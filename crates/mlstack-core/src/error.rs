//! Error types for mlstack

use thiserror::Error;

/// Main error type for mlstack
#[derive(Error, Debug)]
pub enum MlstackError {
    /// Instance type cannot be split into a family segment
    #[error("Malformed instance type: {0}")]
    MalformedInstanceType(String),

    /// Image reference is not `<host>/<repository>:<tag>`
    #[error("Invalid image URI: {0}")]
    InvalidImageUri(String),

    /// No deployment region available
    #[error("Region error: {0}")]
    Region(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for mlstack operations
pub type MlstackResult<T> = Result<T, MlstackError>;

impl From<serde_json::Error> for MlstackError {
    fn from(err: serde_json::Error) -> Self {
        MlstackError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for MlstackError {
    fn from(err: toml::de::Error) -> Self {
        MlstackError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MlstackError::MalformedInstanceType("badformat".to_string());
        assert_eq!(err.to_string(), "Malformed instance type: badformat");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MlstackError = io_err.into();
        assert!(matches!(err, MlstackError::Io(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("not = = toml").unwrap_err();
        let err: MlstackError = toml_err.into();
        assert!(matches!(err, MlstackError::Config(_)));
    }
}
