use thiserror::Error;

use wh_core::WhError;
use wh_inventory::InventoryError;
use wh_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] WhError),

    #[error("layout error: {0}")]
    Layout(#[from] SpatialError),

    #[error("inventory setup failed: {0}")]
    Inventory(#[from] InventoryError),
}

pub type SimResult<T> = Result<T, SimError>;
