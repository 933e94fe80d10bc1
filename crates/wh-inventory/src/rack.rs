//! `Rack` — a fixed-capacity, single-color storage cell.

use std::fmt;

use wh_core::{Cell, Color, RackId};

use crate::{InventoryError, InventoryResult};

/// A storage rack.
///
/// Invariant: `0 <= occupancy <= capacity`.  `add` and `remove` are
/// all-or-nothing: a failing call leaves the rack untouched.
///
/// Two claim counters sit beside the physical occupancy:
///
/// - `reserved` — units promised to loading forklifts but not yet picked.
/// - `incoming` — free slots promised to unloading forklifts.
///
/// Claims are bookkeeping only; `add`/`remove` ignore them, so stock removed
/// outside the claim protocol can leave a claim unsatisfiable.  The claim
/// holder finds out at action time (`ResourceRaceLost`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rack {
    id:        RackId,
    cell:      Cell,
    color:     Color,
    capacity:  u32,
    occupancy: u32,
    reserved:  u32,
    incoming:  u32,
}

impl Rack {
    /// An empty rack.
    pub fn new(id: RackId, cell: Cell, color: Color, capacity: u32) -> Self {
        Self { id, cell, color, capacity, occupancy: 0, reserved: 0, incoming: 0 }
    }

    // ── Identity ──────────────────────────────────────────────────────────

    pub fn id(&self) -> RackId { self.id }
    pub fn cell(&self) -> Cell { self.cell }
    pub fn color(&self) -> Color { self.color }
    pub fn capacity(&self) -> u32 { self.capacity }
    pub fn occupancy(&self) -> u32 { self.occupancy }
    pub fn reserved(&self) -> u32 { self.reserved }
    pub fn incoming(&self) -> u32 { self.incoming }

    // ── Physical transfer ─────────────────────────────────────────────────

    /// Store `units`.  Fails if `units == 0` or the rack lacks the space.
    pub fn add(&mut self, units: u32) -> InventoryResult<()> {
        let space = self.available_space();
        if units == 0 || units > space {
            return Err(InventoryError::InvalidAmount { requested: units, available: space });
        }
        self.occupancy += units;
        Ok(())
    }

    /// Withdraw `units`.  Fails if `units == 0` or fewer are stored.
    pub fn remove(&mut self, units: u32) -> InventoryResult<()> {
        if units == 0 || units > self.occupancy {
            return Err(InventoryError::InvalidAmount {
                requested: units,
                available: self.occupancy,
            });
        }
        self.occupancy -= units;
        Ok(())
    }

    // ── Derived views ─────────────────────────────────────────────────────

    #[inline]
    pub fn available_space(&self) -> u32 {
        self.capacity - self.occupancy
    }

    /// Occupancy as a fraction of capacity, in `[0, 1]`.
    pub fn occupancy_ratio(&self) -> f32 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.occupancy as f32 / self.capacity as f32
    }

    pub fn occupancy_percent(&self) -> f32 {
        self.occupancy_ratio() * 100.0
    }

    pub fn is_full(&self) -> bool {
        self.occupancy >= self.capacity
    }

    /// Units stored and not yet promised to any forklift.
    #[inline]
    pub fn unclaimed_stock(&self) -> u32 {
        self.occupancy.saturating_sub(self.reserved)
    }

    /// Free slots not yet promised to any forklift.
    #[inline]
    pub fn unclaimed_space(&self) -> u32 {
        self.available_space().saturating_sub(self.incoming)
    }

    /// Short label for dashboards: `"occupancy/capacity"`.
    pub fn display_text(&self) -> String {
        format!("{}/{}", self.occupancy, self.capacity)
    }

    // ── Claim counters (driven by `Inventory`) ────────────────────────────

    pub(crate) fn claim_stock(&mut self) -> bool {
        if self.unclaimed_stock() == 0 {
            return false;
        }
        self.reserved += 1;
        true
    }

    pub(crate) fn unclaim_stock(&mut self) {
        assert!(self.reserved > 0, "{}: stock reservation released below zero", self.id);
        self.reserved -= 1;
    }

    pub(crate) fn claim_space(&mut self) -> bool {
        if self.unclaimed_space() == 0 {
            return false;
        }
        self.incoming += 1;
        true
    }

    pub(crate) fn unclaim_space(&mut self) {
        assert!(self.incoming > 0, "{}: space reservation released below zero", self.id);
        self.incoming -= 1;
    }
}

impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rack({}, {}, {}) at {}", self.id.0, self.color, self.display_text(), self.cell)
    }
}
