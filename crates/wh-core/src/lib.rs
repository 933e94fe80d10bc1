//! `wh-core` — foundational types for the warehouse floor simulator.
//!
//! This crate is a dependency of every other `wh-*` crate.  It has no `wh-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ForkliftId`, `DockId`, `RackId`                      |
//! | [`grid`]        | `Cell`, `Color`, `Role`                               |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`config`]      | `SimConfig`                                           |
//! | [`rng`]         | `AgentRng` (per-forklift), `SimRng` (global)          |
//! | [`error`]       | `WhError`, `WhResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{WhError, WhResult};
pub use grid::{Cell, Color, Role};
pub use ids::{DockId, ForkliftId, RackId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, Tick};
