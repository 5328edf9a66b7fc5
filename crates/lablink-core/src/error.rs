use thiserror::Error;

/// Core error types for LabLink operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a new InvalidTimestamp error
    pub fn invalid_timestamp(message: impl Into<String>) -> Self {
        Self::InvalidTimestamp(message.into())
    }

    /// Check if this error is a client error (4xx category)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidTimestamp(_) | Self::JsonError(_))
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_timestamp_constructor() {
        let err = CoreError::invalid_timestamp("not a date");
        match err {
            CoreError::InvalidTimestamp(msg) => assert_eq!(msg, "not a date"),
            _ => panic!("Expected InvalidTimestamp"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_timestamp("2024-13-40");
        assert_eq!(err.to_string(), "Invalid timestamp: 2024-13-40");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::JsonError(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_client_error_classification() {
        assert!(CoreError::invalid_timestamp("x").is_client_error());
    }
}
