//! Error types used throughout fragcache
//!
//! A cache miss is never an error. Only three things can go wrong: the
//! configuration is rejected at construction time, a backend call fails, or a
//! serialising backend hands back bytes that do not decode into an entry.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed underlying cause of a backend failure.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Main error type for fragcache
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Configuration error in field '{field}': {message}")]
    Config { field: String, message: String },

    #[error("Backend error from '{backend}': {source}")]
    Backend {
        backend: String,
        #[source]
        source: BoxError,
        retryable: bool,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CacheError {
    /// Create a configuration error for a specific field
    pub fn config<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::Config { field: field.into(), message: message.into() }
    }

    /// Wrap a backend failure that the caller may retry
    pub fn backend<B, E>(backend: B, source: E) -> Self
    where
        B: Into<String>,
        E: Into<BoxError>,
    {
        Self::Backend { backend: backend.into(), source: source.into(), retryable: true }
    }

    /// Wrap a backend failure that will not succeed on retry
    pub fn backend_fatal<B, E>(backend: B, source: E) -> Self
    where
        B: Into<String>,
        E: Into<BoxError>,
    {
        Self::Backend { backend: backend.into(), source: source.into(), retryable: false }
    }

    /// Whether a caller-side retry could succeed.
    ///
    /// The cache never retries on its own; this only classifies.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Backend { retryable, .. } => *retryable,
            Self::Config { .. } | Self::Serialization(_) => false,
        }
    }
}

/// Result type alias for fragcache operations
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn config_error_names_field() {
        let err = CacheError::config("max_weight", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Configuration error in field 'max_weight': must be greater than zero"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn backend_error_keeps_underlying_cause() {
        let cause = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
        let err = CacheError::backend("redis", cause);

        assert_eq!(err.to_string(), "Backend error from 'redis': connection refused");
        assert!(err.is_retryable());

        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("connection refused"));
    }

    #[test]
    fn fatal_backend_error_is_not_retryable() {
        let err = CacheError::backend_fatal("redis", "authentication rejected");
        assert!(!err.is_retryable());
    }

    #[test]
    fn serialization_error_converts() {
        let parse = serde_json::from_str::<u64>("not a number").unwrap_err();
        let err: CacheError = parse.into();
        assert!(matches!(err, CacheError::Serialization(_)));
        assert!(!err.is_retryable());
    }
}
