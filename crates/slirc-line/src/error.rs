//! Error types for the wire layer.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Wire-level errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The line does not have the minimal `[:source] VERB ...` shape.
    #[error("malformed line: {0:?}")]
    MalformedLine(String),
}

impl ProtocolError {
    /// Whether the read loop can drop the offending line and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedLine(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_is_recoverable() {
        assert!(ProtocolError::MalformedLine(String::new()).is_recoverable());
        let io = ProtocolError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "reset",
        ));
        assert!(!io.is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = ProtocolError::MalformedLine(":only-a-source".to_string());
        assert_eq!(err.to_string(), "malformed line: \":only-a-source\"");
    }
}
