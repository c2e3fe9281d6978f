//! Error types for pager-dots core.

use thiserror::Error;

/// Signal-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    #[error("invalid or disconnected connection ID")]
    InvalidConnection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_error_message() {
        assert_eq!(
            SignalError::InvalidConnection.to_string(),
            "invalid or disconnected connection ID"
        );
    }
}
