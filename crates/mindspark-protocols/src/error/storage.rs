//! Settings persistence errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Settings could not be read: {0}")]
    Read(String),

    #[error("Settings could not be written: {0}")]
    Write(String),

    #[error("Settings are corrupt: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Read(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Corrupt(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_read() {
        let err = StorageError::Read("permission denied".to_string());
        assert!(err.to_string().contains("could not be read"));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_storage_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = StorageError::from(json_err);
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn test_storage_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = StorageError::from(io_err);
        assert!(err.to_string().contains("gone"));
    }
}
