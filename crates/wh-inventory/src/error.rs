use thiserror::Error;

use wh_core::{Color, DockId, RackId};

/// Errors produced by `wh-inventory`.
///
/// None of these halt a simulation: callers fix their own accounting or
/// fall back to an idle state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("invalid amount: requested {requested}, available {available}")]
    InvalidAmount { requested: u32, available: u32 },

    #[error("{color} amount would overflow the order total")]
    AmountOverflow { color: Color },

    #[error("{0} has no active order")]
    NoActiveOrder(DockId),

    #[error("{dock} still has {remaining} units outstanding")]
    OrderIncomplete { dock: DockId, remaining: u32 },

    #[error("{rack} ran out of {what} before the claim was used")]
    ResourceRaceLost { rack: RackId, what: &'static str },
}

pub type InventoryResult<T> = Result<T, InventoryError>;
