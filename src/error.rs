//! Error types for mail-xnames.
//!
//! Heuristic misses (empty headers, count mismatches, unmatched segments) are
//! never errors; they resolve to "no change". Only caller mistakes and decode
//! failures surface here.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Reconcile error: {0}")]
    Reconcile(#[from] ReconcileError),

    #[error("Message error: {0}")]
    Message(#[from] MessageError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Precondition violations for a single header line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error("Header line is not shaped as `key: value`: {line:?}")]
    MalformedLine { line: String },

    #[error("Header key {key:?} is not an x-from/x-to/x-cc/x-bcc key")]
    UnsupportedKey { key: String },

    #[error("Header line prefix {prefix:?} does not match key {key:?}")]
    KeyMismatch { key: String, prefix: String },
}

/// Message decoding errors.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Message could not be decoded ({size} bytes)")]
    Unparseable { size: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn fails_with_reconcile() -> Result<()> {
        let key = "to";
        crate::AddressKind::from_x_header_key(key)
            .ok_or_else(|| ReconcileError::UnsupportedKey { key: key.into() })?;
        Ok(())
    }

    #[test]
    fn reconcile_error_converts_into_top_level() {
        let err = fails_with_reconcile().unwrap_err();
        assert!(matches!(err, Error::Reconcile(_)));
        assert_eq!(
            err.to_string(),
            r#"Reconcile error: Header key "to" is not an x-from/x-to/x-cc/x-bcc key"#
        );
    }

    #[test]
    fn io_error_converts_into_message_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = MessageError::from(io).into();
        assert_eq!(err.to_string(), "Message error: IO error: gone");
    }
}
