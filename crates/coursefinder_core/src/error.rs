//! Application error types for catalog loading and configuration.
use thiserror::Error;

/// Top-level application error type.
///
/// Filtering, encoding and synchronization are total over their inputs; only
/// the catalog boundary can fail.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),
}
