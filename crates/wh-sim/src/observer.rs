//! Simulation observer trait for progress reporting and data collection.

use wh_core::Tick;
use wh_fleet::ForkLift;
use wh_inventory::{CompletedOrder, Inventory};

use crate::{OrderStats, TickSummary};

/// Callbacks invoked by [`WarehouseModel::run`][crate::WarehouseModel::run]
/// at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: completion printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_order_completed(&mut self, order: &CompletedOrder) {
///         println!("{} finished order #{} in {} ticks", order.dock, order.seq, order.duration());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once for every order completed during the tick, before
    /// `on_tick_end`.
    fn on_order_completed(&mut self, _order: &CompletedOrder) {}

    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to the fleet and the inventory.
    fn on_snapshot(&mut self, _tick: Tick, _forklifts: &[ForkLift], _inventory: &Inventory) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _stats: &OrderStats) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
