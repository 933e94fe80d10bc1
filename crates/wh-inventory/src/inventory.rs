//! `Inventory` — the dock and rack registry owned by the model.

use tracing::debug;

use wh_core::{Cell, Color, DockId, RackId, Role};

use crate::{Dock, InventoryError, InventoryResult, Rack, SpaceClaim, StockClaim};

/// All docks and racks on the floor, indexed by their ids.
///
/// Rack selection is first-available in id order; there is no global
/// optimisation of which rack serves which forklift.
#[derive(Clone, Debug, Default)]
pub struct Inventory {
    docks: Vec<Dock>,
    racks: Vec<Rack>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ──────────────────────────────────────────────────────

    pub fn add_dock(&mut self, role: Role, cell: Cell) -> DockId {
        let id = DockId(self.docks.len() as u32);
        self.docks.push(Dock::new(id, role, cell));
        id
    }

    pub fn add_rack(&mut self, cell: Cell, color: Color, capacity: u32) -> RackId {
        let id = RackId(self.racks.len() as u32);
        self.racks.push(Rack::new(id, cell, color, capacity));
        id
    }

    // ── Access ────────────────────────────────────────────────────────────

    pub fn docks(&self) -> &[Dock] {
        &self.docks
    }

    pub fn racks(&self) -> &[Rack] {
        &self.racks
    }

    #[inline]
    pub fn dock(&self, id: DockId) -> &Dock {
        &self.docks[id.index()]
    }

    #[inline]
    pub fn dock_mut(&mut self, id: DockId) -> &mut Dock {
        &mut self.docks[id.index()]
    }

    #[inline]
    pub fn rack(&self, id: RackId) -> &Rack {
        &self.racks[id.index()]
    }

    #[inline]
    pub fn rack_mut(&mut self, id: RackId) -> &mut Rack {
        &mut self.racks[id.index()]
    }

    /// Docks with the given role, in list order.
    pub fn docks_for(&self, role: Role) -> impl Iterator<Item = &Dock> + '_ {
        self.docks.iter().filter(move |d| d.role() == role)
    }

    /// First free dock with the given role.
    pub fn free_dock(&self, role: Role) -> Option<DockId> {
        self.docks_for(role).find(|d| d.is_free()).map(Dock::id)
    }

    /// Sum of every rack's occupancy for `color`.
    pub fn stock_of(&self, color: Color) -> u32 {
        self.racks
            .iter()
            .filter(|r| r.color() == color)
            .map(Rack::occupancy)
            .sum()
    }

    // ── Rack claims ───────────────────────────────────────────────────────

    /// Claim one unit of `color` from the first rack with unclaimed stock.
    pub fn reserve_stock(&mut self, color: Color) -> Option<StockClaim> {
        let rack = self
            .racks
            .iter_mut()
            .find(|r| r.color() == color && r.unclaimed_stock() > 0)?;
        rack.claim_stock().then(|| StockClaim { rack: rack.id() })
    }

    /// Claim one free slot in the first rack of `color` with unclaimed space.
    pub fn reserve_space(&mut self, color: Color) -> Option<SpaceClaim> {
        let rack = self
            .racks
            .iter_mut()
            .find(|r| r.color() == color && r.unclaimed_space() > 0)?;
        rack.claim_space().then(|| SpaceClaim { rack: rack.id() })
    }

    pub fn release_stock(&mut self, claim: StockClaim) {
        self.rack_mut(claim.rack).unclaim_stock();
    }

    pub fn release_space(&mut self, claim: SpaceClaim) {
        self.rack_mut(claim.rack).unclaim_space();
    }

    /// Pick the claimed unit off its rack.
    ///
    /// If the rack was emptied behind the claim's back the claim is released
    /// and `ResourceRaceLost` returned.
    pub fn take_stock(&mut self, claim: StockClaim) -> InventoryResult<()> {
        let rack = self.rack_mut(claim.rack);
        rack.unclaim_stock();
        rack.remove(1).map_err(|_| {
            debug!(rack = %claim.rack, "stock vanished before pickup");
            InventoryError::ResourceRaceLost { rack: claim.rack, what: "stock" }
        })
    }

    /// Put a carried unit into the claimed slot.
    ///
    /// If the rack filled up behind the claim's back the claim is released
    /// and `ResourceRaceLost` returned.
    pub fn store_unit(&mut self, claim: SpaceClaim) -> InventoryResult<()> {
        let rack = self.rack_mut(claim.rack);
        rack.unclaim_space();
        rack.add(1).map_err(|_| {
            debug!(rack = %claim.rack, "space vanished before drop-off");
            InventoryError::ResourceRaceLost { rack: claim.rack, what: "space" }
        })
    }
}
