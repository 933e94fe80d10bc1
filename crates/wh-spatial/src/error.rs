//! Spatial-subsystem error type.

use thiserror::Error;

use wh_core::Cell;

/// Errors produced by `wh-spatial`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpatialError {
    #[error("no path from {from} to {to}")]
    PathNotFound { from: Cell, to: Cell },

    #[error("cell {0} is outside the floor")]
    OutOfBounds(Cell),

    #[error("cell {0} is already occupied by a rack or dock")]
    Occupied(Cell),

    #[error("{0} has no navigable neighbour")]
    NoAccess(Cell),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
