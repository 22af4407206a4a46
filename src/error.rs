//! Error types for huddle.

use thiserror::Error;

/// Common error type for huddle.
#[derive(Error, Debug)]
pub enum HuddleError {
    /// Database error.
    ///
    /// Wraps statement failures, including constraint violations such as a
    /// message referencing a room that does not exist.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed wire frame.
    #[error("frame error: {0}")]
    Frame(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for HuddleError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                HuddleError::DatabaseConnection(e.to_string())
            }
            other => HuddleError::Database(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for HuddleError {
    fn from(e: serde_json::Error) -> Self {
        HuddleError::Frame(e.to_string())
    }
}

/// Result type alias for huddle operations.
pub type Result<T> = std::result::Result<T, HuddleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = HuddleError::Validation("room name too long".to_string());
        assert_eq!(err.to_string(), "validation error: room name too long");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HuddleError = io_err.into();
        assert!(matches!(err, HuddleError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: HuddleError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, HuddleError::Database(_)));

        let err: HuddleError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, HuddleError::DatabaseConnection(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: HuddleError = json_err.into();
        assert!(matches!(err, HuddleError::Frame(_)));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(HuddleError::Config("bad port".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
