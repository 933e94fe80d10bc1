//! Single-use reservation handles.
//!
//! A handle can only be created inside this crate, at the moment the
//! matching counter is decremented, and is moved into whichever call
//! consumes it.  Releasing twice or using a released claim does not compile.

use wh_core::{Color, DockId, RackId};

/// One unit of one color claimed from a dock's reservation ledger.
///
/// Bound to the order sequence number the dock assigned when it received
/// the order, so it can never be applied to a later order at the same dock.
#[must_use = "a ledger claim must be consumed or released"]
#[derive(Debug, PartialEq, Eq)]
pub struct LedgerClaim {
    pub(crate) dock:  DockId,
    pub(crate) seq:   u64,
    pub(crate) color: Color,
}

impl LedgerClaim {
    pub fn dock(&self) -> DockId {
        self.dock
    }

    pub fn order_seq(&self) -> u64 {
        self.seq
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// One unit of stock promised from a rack to a loading forklift.
#[must_use = "a stock claim must be taken or released"]
#[derive(Debug, PartialEq, Eq)]
pub struct StockClaim {
    pub(crate) rack: RackId,
}

impl StockClaim {
    pub fn rack(&self) -> RackId {
        self.rack
    }
}

/// One free slot promised in a rack to an unloading forklift.
#[must_use = "a space claim must be filled or released"]
#[derive(Debug, PartialEq, Eq)]
pub struct SpaceClaim {
    pub(crate) rack: RackId,
}

impl SpaceClaim {
    pub fn rack(&self) -> RackId {
        self.rack
    }
}
