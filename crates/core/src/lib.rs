//! Shared primitives for all Rust crates in Tessera.

#![forbid(unsafe_code)]

/// Explicit request context passed into audit construction.
pub mod request;

use thiserror::Error;

pub use request::{RequestContext, RequestMetadata};

/// Result type used across Tessera crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
