//! The `WarehouseModel` struct and its tick loop.

use std::collections::VecDeque;

use tracing::{debug, info};

use wh_core::{AgentRng, Role, SimClock, SimConfig, SimRng, Tick};
use wh_fleet::{FleetContext, ForkLift, ForkliftState};
use wh_inventory::{Dock, Inventory, Order};
use wh_spatial::{GridLayout, PathFinder};

use crate::{OrderSource, OrderStats, SimObserver, TickSummary};

/// The warehouse floor and everything on it.
///
/// `WarehouseModel<P, S>` owns the layout, the inventory, the fleet and the
/// order queues, and drives the tick loop described in the crate docs.
///
/// Create via [`ModelBuilder`][crate::ModelBuilder].
pub struct WarehouseModel<P: PathFinder, S: OrderSource> {
    /// Global configuration (total ticks, seed, order cadence, …).
    pub config: SimConfig,

    pub clock: SimClock,

    pub(crate) layout:      GridLayout,
    pub(crate) inventory:   Inventory,
    pub(crate) forklifts:   Vec<ForkLift>,
    /// Per-forklift RNGs, indexed like `forklifts`.
    pub(crate) rngs:        Vec<AgentRng>,
    pub(crate) sim_rng:     SimRng,
    pub(crate) path_finder: P,
    pub(crate) orders:      S,
    /// Orders waiting for a free dock, indexed by `Role::index`.
    pub(crate) queues:      [VecDeque<Order>; 2],
    pub(crate) stats:       OrderStats,
    /// Forklift indices, reshuffled every tick.
    pub(crate) turn_order:  Vec<usize>,
}

impl<P: PathFinder, S: OrderSource> WarehouseModel<P, S> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Mutable inventory access, for scripted scenarios that restock or
    /// drain racks from outside the fleet.
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn forklifts(&self) -> &[ForkLift] {
        &self.forklifts
    }

    pub fn stats(&self) -> &OrderStats {
        &self.stats
    }

    pub fn queued(&self, role: Role) -> usize {
        self.queues[role.index()].len()
    }

    // ── Orders ────────────────────────────────────────────────────────────

    /// Hand `order` to the first free dock of `role`, or queue it.
    ///
    /// Returns `true` if the order went straight to a dock.  Empty orders
    /// are dropped.  While earlier orders are still queued a new order
    /// joins the back of the queue, so orders reach docks first-come,
    /// first-served.
    pub fn submit_order(&mut self, role: Role, order: Order) -> bool {
        if order.is_empty() {
            debug!(%role, "dropping empty order");
            return false;
        }
        let now = self.now();
        let queue = &mut self.queues[role.index()];
        if !queue.is_empty() {
            queue.push_back(order);
            return false;
        }
        match assign(&mut self.inventory, role, order, now) {
            Ok(()) => true,
            Err(order) => {
                debug!(%role, %order, "no free dock, order queued");
                self.queues[role.index()].push_back(order);
                false
            }
        }
    }

    /// Move queued orders onto free docks.  Returns the number placed.
    fn drain_queues(&mut self, now: Tick) -> usize {
        let mut placed = 0;
        for role in Role::ALL {
            let queue = &mut self.queues[role.index()];
            while let Some(order) = queue.pop_front() {
                match assign(&mut self.inventory, role, order, now) {
                    Ok(()) => placed += 1,
                    Err(order) => {
                        queue.push_front(order);
                        break;
                    }
                }
            }
        }
        placed
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while self.now() < self.config.end_tick() {
            self.tick_observed(observer);
        }
        observer.on_sim_end(self.now(), &self.stats);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick_observed(observer);
        }
    }

    /// Process one tick without an observer.
    pub fn step(&mut self) -> TickSummary {
        let now = self.now();
        let summary = self.process_tick(now);
        self.clock.advance();
        summary
    }

    fn tick_observed<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.now();
        observer.on_tick_start(now);
        let summary = self.process_tick(now);
        for order in &summary.completed {
            observer.on_order_completed(order);
        }
        observer.on_tick_end(&summary);
        if now.is_every(self.config.output_interval_ticks) {
            observer.on_snapshot(now, &self.forklifts, &self.inventory);
        }
        self.clock.advance();
    }

    fn process_tick(&mut self, now: Tick) -> TickSummary {
        // ── ① queued orders first ─────────────────────────────────────────
        let mut assigned = self.drain_queues(now);

        // ── ② new orders ──────────────────────────────────────────────────
        for role in Role::ALL {
            if let Some(order) = self.orders.poll(now, role, &mut self.sim_rng) {
                if self.submit_order(role, order) {
                    assigned += 1;
                }
            }
        }

        // ── ③ forklifts, in a fresh random order ──────────────────────────
        self.sim_rng.shuffle(&mut self.turn_order);

        // Explicit field borrows so the borrow checker sees disjoint access.
        let mut ctx = FleetContext::new(now, &self.layout, &self.path_finder, &mut self.inventory);
        let mut moved = 0;
        let mut completed = Vec::new();
        for &i in &self.turn_order {
            let event = self.forklifts[i].step(&mut ctx, &mut self.rngs[i]);
            if event.is_move() {
                moved += 1;
            }
            if let Some(order) = event.completed_order() {
                info!(
                    dock = %order.dock,
                    role = %order.role,
                    seq = order.seq,
                    units = order.units,
                    duration = order.duration(),
                    "order completed",
                );
                self.stats.record(order);
                completed.push(order.clone());
            }
        }

        if cfg!(debug_assertions) {
            self.inventory.docks().iter().for_each(Dock::check_invariant);
        }

        TickSummary {
            tick: now,
            moved,
            idle: self.forklifts.iter().filter(|f| f.state() == ForkliftState::Idle).count(),
            carrying: self.forklifts.iter().filter(|f| f.carried_units() > 0).count(),
            free_docks: self.inventory.docks().iter().filter(|d| d.is_free()).count(),
            queued: self.queues.iter().map(VecDeque::len).sum(),
            assigned,
            completed,
        }
    }

    /// Assert every cross-object invariant.  Intended for tests and debug
    /// tooling.
    ///
    /// # Panics
    ///
    /// On the first violation found.
    pub fn check_invariants(&self) {
        for dock in self.inventory.docks() {
            dock.check_invariant();
        }
        for rack in self.inventory.racks() {
            assert!(rack.occupancy() <= rack.capacity(), "{rack} over capacity");
            // Claims may outrun stock or space changed from outside the
            // fleet; the holder finds out at action time.  They can never
            // exceed the rack itself.
            assert!(rack.reserved() <= rack.capacity(), "{rack} has more stock claims than slots");
            assert!(rack.incoming() <= rack.capacity(), "{rack} has more space claims than slots");
        }
        for f in &self.forklifts {
            assert!(f.carried_units() <= 1, "{} carries more than one unit", f.id());
        }
    }
}

/// Give `order` to the first free dock of `role`, handing it back if every
/// dock is busy.
fn assign(inventory: &mut Inventory, role: Role, order: Order, now: Tick) -> Result<(), Order> {
    let Some(dock) = inventory.free_dock(role) else {
        return Err(order);
    };
    let units = order.total();
    let seq = inventory.dock_mut(dock).receive_order(order, now)?;
    info!(%dock, %role, seq, units, "order assigned");
    Ok(())
}
