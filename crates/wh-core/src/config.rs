//! Top-level simulation configuration.

use crate::{Tick, WhError, WhResult};

/// Simulation configuration.
///
/// Typically built in code or loaded from JSON by the application crate
/// (with the `serde` feature) and passed to the model builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Total ticks to simulate with `WarehouseModel::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Generate one order per role every N ticks.  0 disables generated orders.
    pub order_interval_ticks: u64,

    /// Smallest generated order (units across all colors).
    pub min_order_units: u32,

    /// Largest generated order (inclusive).
    pub max_order_units: u32,

    /// Units a single rack can hold.
    pub rack_capacity: u32,

    /// Fraction of every rack's capacity filled at setup, in `[0, 1]`.
    pub initial_fill_ratio: f32,

    /// Call `SimObserver::on_snapshot` every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:           2_000,
            seed:                  42,
            order_interval_ticks:  50,
            min_order_units:       5,
            max_order_units:       20,
            rack_capacity:         15,
            initial_fill_ratio:    0.5,
            output_interval_ticks: 10,
        }
    }
}

impl SimConfig {
    /// The tick at which `run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject configurations the model cannot run.
    pub fn validate(&self) -> WhResult<()> {
        if self.rack_capacity == 0 {
            return Err(WhError::Config("rack_capacity must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.initial_fill_ratio) {
            return Err(WhError::Config(format!(
                "initial_fill_ratio {} outside [0, 1]",
                self.initial_fill_ratio
            )));
        }
        if self.min_order_units > self.max_order_units {
            return Err(WhError::Config(format!(
                "min_order_units {} exceeds max_order_units {}",
                self.min_order_units, self.max_order_units
            )));
        }
        if self.order_interval_ticks > 0 && self.max_order_units == 0 {
            return Err(WhError::Config("generated orders need max_order_units > 0".into()));
        }
        Ok(())
    }

    /// Units pre-filled into each rack at setup.
    pub fn initial_rack_fill(&self) -> u32 {
        let fill = (self.rack_capacity as f32 * self.initial_fill_ratio).round() as u32;
        fill.min(self.rack_capacity)
    }
}
