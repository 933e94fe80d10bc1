//! `wh-spatial` — floor layout and grid routing.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`layout`]     | `Layout` trait, `GridLayout`, `GridLayoutBuilder`, sites   |
//! | [`reference`]  | `LayoutConfig`, the reference rack-block floor generator   |
//! | [`pathfinder`] | `PathFinder` trait, `Path`, `AStarPathFinder`              |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `LayoutConfig`.         |

pub mod error;
pub mod layout;
pub mod pathfinder;
pub mod reference;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use layout::{DockSite, GridLayout, GridLayoutBuilder, Layout, RackSite, StandbySite};
pub use pathfinder::{AStarPathFinder, Path, PathFinder};
pub use reference::LayoutConfig;
