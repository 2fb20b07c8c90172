//! Engine error type for the tour, the CLI and embedders.
//!
//! Library calls return [`PolarsError`] like the Polars API they wrap. Use
//! [`EngineError`] when you want a single error type without depending on
//! Polars error variants.

use polars::error::PolarsError;
use thiserror::Error;

/// Unified error type for spark-primer operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// User-facing error (invalid input, unsupported operation, stopped session).
    #[error("user error: {0}")]
    User(String),
    /// A value was used in a context its type does not support,
    /// e.g. displaying a column expression as if it were a DataFrame.
    #[error("type error: {0}")]
    Type(String),
    /// Resource not found (column, file).
    #[error("not found: {0}")]
    NotFound(String),
    /// I/O error (file not found, permission, etc.).
    #[error("io error: {0}")]
    Io(String),
    /// Internal / compute error.
    #[error("internal error: {0}")]
    Internal(String),
    /// Other / unclassified.
    #[error("{0}")]
    Other(String),
}

impl From<PolarsError> for EngineError {
    fn from(e: PolarsError) -> Self {
        let msg = e.to_string();
        match root_cause(&e) {
            PolarsError::ColumnNotFound(_) => EngineError::NotFound(msg),
            PolarsError::InvalidOperation(_) | PolarsError::SchemaMismatch(_) => {
                EngineError::User(msg)
            }
            PolarsError::ComputeError(_) => EngineError::Internal(msg),
            PolarsError::IO { .. } => EngineError::Io(msg),
            _ => EngineError::Other(msg),
        }
    }
}

/// Polars wraps errors raised while resolving a plan in `Context`; classify by the inner one.
fn root_cause(e: &PolarsError) -> &PolarsError {
    match e {
        PolarsError::Context { error, .. } => root_cause(error),
        other => other,
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Internal(e.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_not_found_maps_to_not_found() {
        let err: EngineError = PolarsError::ColumnNotFound("colour".into()).into();
        assert!(matches!(err, EngineError::NotFound(_)));
        assert!(err.to_string().starts_with("not found:"));
    }

    #[test]
    fn invalid_operation_maps_to_user() {
        let err: EngineError = PolarsError::InvalidOperation("session stopped".into()).into();
        assert!(matches!(err, EngineError::User(ref m) if m.contains("session stopped")));
    }

    #[test]
    fn context_is_classified_by_inner_error() {
        let err: EngineError = PolarsError::ColumnNotFound("COUNT".into())
            .context("resolving 'select'".into())
            .into();
        assert!(matches!(err, EngineError::NotFound(ref m) if m.contains("COUNT")));
    }

    #[test]
    fn io_error_maps_to_io() {
        let err: EngineError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, EngineError::Io(_)));
    }

    #[test]
    fn type_error_display() {
        let err = EngineError::Type("'Column' object is not displayable".into());
        assert_eq!(err.to_string(), "type error: 'Column' object is not displayable");
    }
}
