//! `wh-fleet` — forklift state machines.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`state`]    | `ForkliftState` — the six-state lifecycle and its labels       |
//! | [`context`]  | `FleetContext` — the world a forklift sees during one step     |
//! | [`event`]    | `StepEvent` — what a single step did                           |
//! | [`forklift`] | `ForkLift` — discovery, claims, movement and transfers         |
//! | [`error`]    | `FleetError`, `FleetResult<T>`                                 |
//!
//! # Lifecycle
//!
//! ```text
//!   IDLE ──claim──▶ GOING_TO_SOURCE ──arrive──▶ LOADING ──pick──▶ GOING_TO_DEST
//!    ▲  │                                          │                   │
//!    │  └─no work─▶ GOING_TO_STANDBY ─arrive─▶ IDLE│                arrive
//!    │                                             ▼                   ▼
//!    └───────────────────── deliver ──────────── (fail) ◀──────── UNLOADING
//! ```
//!
//! An unloading forklift's source is a dock and its destination a rack; a
//! loading forklift's source is a rack and its destination a dock.  Every
//! unit in flight is backed by two claims taken in the same step: one on the
//! dock's reservation ledger and one on a rack (stock or space).  Each claim
//! is used exactly once or released on a failure path, so no unit is ever
//! promised to two forklifts.

pub mod context;
pub mod error;
pub mod event;
pub mod forklift;
pub mod state;


pub use context::FleetContext;
pub use error::{FleetError, FleetResult};
pub use event::StepEvent;
pub use forklift::ForkLift;
pub use state::ForkliftState;
