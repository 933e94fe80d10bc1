//! Framework error type.
//!
//! Sub-crates define their own error enums (`InventoryError`,
//! `SpatialError`, …); `wh-sim` wraps `WhError` for configuration problems
//! found while building a model.

use thiserror::Error;

/// Errors raised by `wh-core` itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WhError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `wh-core`.
pub type WhResult<T> = Result<T, WhError>;
