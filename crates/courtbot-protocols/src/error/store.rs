//! Blob storage errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: StoreError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_invalid_key_display() {
        let err = StoreError::InvalidKey("../etc".to_string());
        assert!(err.to_string().contains("../etc"));
    }
}
