//! Unified error types for price-list.
//!
//! Only loading, export and configuration can fail. Everything the list
//! component does in response to user input degrades to "leave the current
//! state unchanged" instead of producing an error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for price-list operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PriceListError {
    /// Errors while reading a product collection
    #[error("Failed to load products: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// Errors during export
    #[error("Export failed: {context}")]
    Export {
        context: String,
        #[source]
        source: ExportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific load error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Product '{0}' has an empty price history")]
    EmptyHistory(String),
}

/// Specific export error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExportErrorKind {
    #[error("JSON serialization failed: {0}")]
    Json(String),

    #[error("CSV serialization failed: {0}")]
    Csv(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Convenient Result type for price-list operations
pub type Result<T> = std::result::Result<T, PriceListError>;

impl PriceListError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create an export error with context
    pub fn export(context: impl Into<String>, source: ExportErrorKind) -> Self {
        Self::Export {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<std::io::Error> for PriceListError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for PriceListError {
    fn from(err: serde_json::Error) -> Self {
        Self::load(
            "JSON deserialization",
            LoadErrorKind::InvalidJson(err.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PriceListError::load("at items.json", LoadErrorKind::EmptyHistory("billa-1".into()));
        assert_eq!(err.to_string(), "Failed to load products: at items.json");

        let err = PriceListError::export("items.csv", ExportErrorKind::Delivery("disk full".into()));
        assert!(err.to_string().contains("items.csv"));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = PriceListError::io("/tmp/items.json", io);
        match err {
            PriceListError::Io { path, message, .. } => {
                assert_eq!(path, Some(PathBuf::from("/tmp/items.json")));
                assert_eq!(message, "missing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let err: PriceListError = serde_json::from_str::<Vec<u8>>("not json").unwrap_err().into();
        assert!(matches!(
            err,
            PriceListError::Load {
                source: LoadErrorKind::InvalidJson(_),
                ..
            }
        ));
    }
}
