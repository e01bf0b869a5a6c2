//! Error types for the readout extraction engine.

use thiserror::Error;

/// Primary error type for extraction operations.
///
/// Only [`ExtractError::Open`] is fatal to a run. Everything below the
/// document level is converted into page-local or item-local fallback
/// behavior by the driver and pipeline (see the module docs on
/// [`crate::pipeline`]).
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("cannot open document: {0}")]
    Open(String),

    #[error("cannot read page {page}: {msg}")]
    Page { page: usize, msg: String },

    #[error("image did not resolve: {0}")]
    ImageResolve(String),

    #[error("ocr failed: {0}")]
    Ocr(String),

    #[error("render failed: {0}")]
    Render(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias for ExtractError.
pub type Result<T> = std::result::Result<T, ExtractError>;
