//! `wh-sim` — the warehouse model and its tick loop.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Queues    — waiting orders move to free docks, FIFO per role.
//!   ② Orders    — the OrderSource is polled once per role; a new order
//!                 goes to a free dock or joins the queue.
//!   ③ Forklifts — every forklift steps once, in an order reshuffled
//!                 each tick.  Completed orders are recorded in OrderStats.
//!   ④ Observer  — tick summary, completions and periodic snapshots.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wh_core::SimConfig;
//! use wh_sim::{ModelBuilder, NoopObserver};
//! use wh_spatial::{GridLayout, LayoutConfig};
//!
//! let layout = GridLayout::reference(&LayoutConfig::default())?;
//! let mut model = ModelBuilder::new(SimConfig::default(), layout).build()?;
//! model.run(&mut NoopObserver);
//! println!("{} orders done", model.stats().total_completed());
//! ```

pub mod builder;
pub mod error;
pub mod model;
pub mod observer;
pub mod orders;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::ModelBuilder;
pub use error::{SimError, SimResult};
pub use model::WarehouseModel;
pub use observer::{NoopObserver, SimObserver};
pub use orders::{NoOrders, OrderSource, PeriodicOrders};
pub use stats::{OrderStats, TickSummary};
