//! `Dock` — a truck bay holding at most one active order.

use wh_core::{Cell, Color, DockId, Role, Tick};

use crate::{InventoryError, InventoryResult, LedgerClaim, Order};

/// The order a dock is currently working on.
#[derive(Clone, Debug)]
struct ActiveOrder {
    seq:         u64,
    order:       Order,
    /// Working copy of `order`, decremented when a forklift claims a unit.
    ledger:      Order,
    assigned_at: Tick,
    units:       u32,
}

/// Record of an order a dock has finished.  The statistics sink consumes
/// these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletedOrder {
    pub dock:         DockId,
    pub role:         Role,
    pub seq:          u64,
    pub units:        u32,
    pub assigned_at:  Tick,
    pub completed_at: Tick,
}

impl CompletedOrder {
    /// Ticks from assignment to completion.
    pub fn duration(&self) -> u64 {
        self.completed_at.since(self.assigned_at)
    }
}

/// A loading or unloading dock.
///
/// The role only changes who works the dock (and whether its order is
/// supply or demand); the structure is the same for both.
///
/// # Ledger invariant
///
/// Per color, `ledger <= order` at all times.  Claims decrement the ledger,
/// physical transfers decrement the order.  A claim is outstanding exactly
/// while `ledger < order` for its color, so an order cannot reach zero (and
/// the dock cannot free itself) while any claim against it is in flight.
#[derive(Clone, Debug)]
pub struct Dock {
    id:        DockId,
    role:      Role,
    cell:      Cell,
    active:    Option<ActiveOrder>,
    next_seq:  u64,
    completed: u64,
}

impl Dock {
    /// A free dock.
    pub fn new(id: DockId, role: Role, cell: Cell) -> Self {
        Self { id, role, cell, active: None, next_seq: 0, completed: 0 }
    }

    pub fn id(&self) -> DockId { self.id }
    pub fn role(&self) -> Role { self.role }
    pub fn cell(&self) -> Cell { self.cell }

    /// Number of orders this dock has completed.
    pub fn completed_count(&self) -> u64 { self.completed }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.active.is_none()
    }

    pub fn current_order(&self) -> Option<&Order> {
        self.active.as_ref().map(|a| &a.order)
    }

    pub fn reservation_ledger(&self) -> Option<&Order> {
        self.active.as_ref().map(|a| &a.ledger)
    }

    /// Sequence number of the active order.
    pub fn order_seq(&self) -> Option<u64> {
        self.active.as_ref().map(|a| a.seq)
    }

    pub fn assigned_at(&self) -> Option<Tick> {
        self.active.as_ref().map(|a| a.assigned_at)
    }

    /// Colors with at least one unclaimed unit.  Empty when the dock is
    /// free or its ledger is fully reserved.
    pub fn reservable_colors(&self) -> Vec<Color> {
        self.reservation_ledger()
            .map(Order::colors_remaining)
            .unwrap_or_default()
    }

    // ── Order lifecycle ───────────────────────────────────────────────────

    /// Take ownership of `order` if the dock is free.
    ///
    /// Returns the order's sequence number.  An occupied dock, or an empty
    /// order, hands the order back unchanged.
    pub fn receive_order(&mut self, order: Order, now: Tick) -> Result<u64, Order> {
        if !self.is_free() || order.is_empty() {
            return Err(order);
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.active = Some(ActiveOrder {
            seq,
            ledger: order.clone(),
            units: order.total(),
            order,
            assigned_at: now,
        });
        Ok(seq)
    }

    /// `true` once every unit of the active order has been transferred.
    pub fn is_complete(&self) -> bool {
        self.current_order().is_some_and(Order::is_empty)
    }

    /// Close out the active order and free the dock.
    ///
    /// Valid only once the order total is zero.
    pub fn complete_order(&mut self, now: Tick) -> InventoryResult<CompletedOrder> {
        let remaining = self
            .current_order()
            .map(Order::total)
            .ok_or(InventoryError::NoActiveOrder(self.id))?;
        if remaining > 0 {
            return Err(InventoryError::OrderIncomplete { dock: self.id, remaining });
        }

        let Some(active) = self.active.take() else {
            return Err(InventoryError::NoActiveOrder(self.id));
        };
        self.completed += 1;
        Ok(CompletedOrder {
            dock:         self.id,
            role:         self.role,
            seq:          active.seq,
            units:        active.units,
            assigned_at:  active.assigned_at,
            completed_at: now,
        })
    }

    // ── Reservation ledger ────────────────────────────────────────────────

    /// Claim one unit of `color` from the ledger.
    ///
    /// Returns `None` if the dock is free or no unit of that color is left
    /// unclaimed.
    pub fn try_reserve(&mut self, color: Color) -> Option<LedgerClaim> {
        let active = self.active.as_mut()?;
        active.ledger.take(color, 1).ok()?;
        Some(LedgerClaim { dock: self.id, seq: active.seq, color })
    }

    /// Return a claimed unit to the ledger.
    ///
    /// # Panics
    ///
    /// If the claim belongs to a different order, or if the release would
    /// push the ledger above the order.  Both mean the double-booking
    /// guarantee is already broken.
    pub fn release(&mut self, claim: LedgerClaim) {
        let active = self.active_for(&claim);
        active
            .ledger
            .put(claim.color, 1)
            .unwrap_or_else(|e| panic!("{}: ledger release failed: {e}", claim.dock));
        self.check_invariant();
    }

    /// Physically transfer the claimed unit: decrement the order.
    ///
    /// For an unloading dock this is the pickup; for a loading dock it is
    /// the delivery.
    pub fn consume(&mut self, claim: LedgerClaim) -> InventoryResult<()> {
        let active = self.active_for(&claim);
        active.order.take(claim.color, 1)?;
        self.check_invariant();
        Ok(())
    }

    /// Undo a `consume` made in the same step: the unit goes back on both
    /// the order and the ledger, unclaimed.
    pub fn restore(&mut self, color: Color, seq: u64) -> InventoryResult<()> {
        let active = match self.active.as_mut() {
            Some(a) if a.seq == seq => a,
            _ => return Err(InventoryError::NoActiveOrder(self.id)),
        };
        active.order.put(color, 1)?;
        active.ledger.put(color, 1)?;
        Ok(())
    }

    /// Assert the ledger never exceeds the order.
    ///
    /// # Panics
    ///
    /// On violation.
    pub fn check_invariant(&self) {
        if let Some(active) = &self.active {
            assert!(
                active.ledger.is_covered_by(&active.order),
                "{}: reservation ledger {} exceeds order {}",
                self.id,
                active.ledger,
                active.order,
            );
        }
    }

    fn active_for(&mut self, claim: &LedgerClaim) -> &mut ActiveOrder {
        let id = self.id;
        match self.active.as_mut() {
            Some(active) if claim.dock == id && active.seq == claim.seq => active,
            _ => panic!("{id}: claim for order #{} outlived its order", claim.seq),
        }
    }
}
