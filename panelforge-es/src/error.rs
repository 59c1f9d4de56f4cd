//! Error types for the query-editor model

use thiserror::Error;

/// Errors surfaced while rendering entities to their wire form.
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
