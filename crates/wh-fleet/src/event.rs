//! Outcome of a single forklift step.

use wh_core::{Cell, Color, DockId};
use wh_inventory::CompletedOrder;

use crate::FleetError;

/// What one call to [`ForkLift::step`](crate::ForkLift::step) did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEvent {
    /// Idle at the standby cell with nothing to do.
    Waiting,
    /// No claimable work anywhere; heading back to standby.
    NoWork,
    /// Claimed one unit of `color` for `dock` and started towards the source.
    Claimed { dock: DockId, color: Color },
    /// A claim could not be completed and was released again.
    ClaimRolledBack { dock: DockId, color: Color, reason: FleetError },
    /// Moved one cell.
    Moved { to: Cell },
    /// Path was already exhausted; switched state without moving.
    Arrived { at: Cell },
    /// Picked a unit up at the source.
    PickedUp { color: Color },
    /// Pickup failed; all claims were released or undone.
    PickupFailed { color: Color, reason: FleetError },
    /// Put a unit down at the destination.  `completed` is set when this
    /// delivery closed the dock's order.
    Delivered { color: Color, completed: Option<CompletedOrder> },
    /// The drop-off slot was lost; the unit is still on the forks.
    DropoffDeferred { color: Color, reason: FleetError },
}

impl StepEvent {
    pub fn is_move(&self) -> bool {
        matches!(self, StepEvent::Moved { .. })
    }

    pub fn completed_order(&self) -> Option<&CompletedOrder> {
        match self {
            StepEvent::Delivered { completed, .. } => completed.as_ref(),
            _ => None,
        }
    }
}
