//! Engine-wide error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant.

use thiserror::Error;

/// The base error type for `fd-core` and a common root for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `fd-core`.
pub type CoreResult<T> = Result<T, CoreError>;
