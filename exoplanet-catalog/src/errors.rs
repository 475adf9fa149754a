//! Error types for catalog loading and querying.
//!
//! Nothing in the load/query path is fatal: the service logs these and
//! degrades to an empty catalog. They surface directly only from the
//! fallible entry points ([`CatalogParser::try_parse`](crate::query::CatalogParser::try_parse),
//! column and field name parsing) that the CLI uses.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`MissingHeader`](CatalogError::MissingHeader) | text with no non-comment line |
//! | [`Io`](CatalogError::Io) | reading a catalog file from disk |
//! | [`UnknownColumn`](CatalogError::UnknownColumn) | sort column or field name that does not resolve |
//! | [`InvalidField`](CatalogError::InvalidField) | filter value that does not parse for its field |

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog text contained only blank and `#` comment lines.
    #[error("Could not find header line in catalog")]
    MissingHeader,

    #[error("Failed to read catalog file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// Convenience alias for `Result<T, CatalogError>`.
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_field(field: &'static str, value: &str) -> Self {
        Self::InvalidField {
            field,
            value: value.to_string(),
        }
    }
}
