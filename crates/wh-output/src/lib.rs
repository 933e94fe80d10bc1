//! `wh-output` — simulation output writers for the warehouse simulator.
//!
//! The CSV backend creates three files in its output directory:
//!
//! | File                      | One row per                                 |
//! |---------------------------|---------------------------------------------|
//! | `order_completions.csv`   | completed order                             |
//! | `tick_summaries.csv`      | tick                                        |
//! | `forklift_snapshots.csv`  | forklift, every `output_interval_ticks`     |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `wh_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wh_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! model.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{ForkliftSnapshotRow, OrderCompletionRow, TickSummaryRow};
pub use writer::OutputWriter;
