//! `wh-inventory` — goods ledgers and the reservation protocol.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`order`]     | `Order` — per-color unit ledger                             |
//! | [`rack`]      | `Rack` — fixed-capacity single-color storage cell           |
//! | [`dock`]      | `Dock`, `CompletedOrder` — truck bay with reservation ledger|
//! | [`claim`]     | `LedgerClaim`, `StockClaim`, `SpaceClaim`                   |
//! | [`inventory`] | `Inventory` — dock and rack registry, claim entry points    |
//! | [`error`]     | `InventoryError`, `InventoryResult<T>`                      |
//!
//! # Reservation protocol
//!
//! Every unit moved by a forklift goes through two phases:
//!
//! 1. **Claim** — at decision time the forklift takes a claim handle, which
//!    eagerly decrements a counter (dock ledger, rack `reserved` / `incoming`).
//!    Two forklifts scanning the same dock in the same tick can therefore
//!    never both claim the last unit.
//! 2. **Use or release** — the handle is consumed exactly once, either by the
//!    physical transfer (`Dock::consume`, `Inventory::take_stock`,
//!    `Inventory::store_unit`) or by the matching `release_*` call on a
//!    failure path.  Handles are neither `Clone` nor `Copy`.
//!
//! Physical operations re-validate the resource and report
//! [`InventoryError::ResourceRaceLost`] when the claim is no longer
//! satisfiable; the claim has been released by then.

pub mod claim;
pub mod dock;
pub mod error;
pub mod inventory;
pub mod order;
pub mod rack;


pub use claim::{LedgerClaim, SpaceClaim, StockClaim};
pub use dock::{CompletedOrder, Dock};
pub use error::{InventoryError, InventoryResult};
pub use inventory::Inventory;
pub use order::Order;
pub use rack::Rack;
