//! Fleet error type.
//!
//! Forklift steps never return these: every failure is rolled back inside
//! the step and reported through [`StepEvent`](crate::StepEvent).

use thiserror::Error;

use wh_core::{Cell, Color};
use wh_inventory::InventoryError;
use wh_spatial::SpatialError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FleetError {
    #[error("inventory: {0}")]
    Inventory(#[from] InventoryError),

    #[error("routing: {0}")]
    Spatial(#[from] SpatialError),

    #[error("no {color} rack has unclaimed {what}")]
    NoRack { color: Color, what: &'static str },

    #[error("{0} has no navigable access cell")]
    NoAccess(Cell),
}

pub type FleetResult<T> = Result<T, FleetError>;
