//! Where new orders come from.

use wh_core::{Role, SimConfig, SimRng, Tick};
use wh_inventory::Order;

/// Supplies new orders to the model.
///
/// Polled once per role at the start of every tick, after queued orders
/// have been placed.  Returning `None` means "no new order this tick".
pub trait OrderSource {
    fn poll(&mut self, tick: Tick, role: Role, rng: &mut SimRng) -> Option<Order>;
}

/// One order per role every `interval` ticks, starting at tick 0.
///
/// The total is drawn uniformly from `min_units..=max_units` and split
/// across colors with [`Order::random`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeriodicOrders {
    pub interval:  u64,
    pub min_units: u32,
    pub max_units: u32,
}

impl PeriodicOrders {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            interval:  config.order_interval_ticks,
            min_units: config.min_order_units,
            max_units: config.max_order_units,
        }
    }
}

impl OrderSource for PeriodicOrders {
    fn poll(&mut self, tick: Tick, _role: Role, rng: &mut SimRng) -> Option<Order> {
        if !tick.is_every(self.interval) || self.max_units == 0 {
            return None;
        }
        let total = rng.gen_range(self.min_units..=self.max_units);
        Some(Order::random(total, rng.inner()))
    }
}

/// Never produces anything; orders arrive only through `submit_order`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOrders;

impl OrderSource for NoOrders {
    fn poll(&mut self, _tick: Tick, _role: Role, _rng: &mut SimRng) -> Option<Order> {
        None
    }
}
