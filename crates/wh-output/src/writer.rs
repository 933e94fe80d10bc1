//! The `OutputWriter` trait implemented by backend writers.

use crate::{ForkliftSnapshotRow, OrderCompletionRow, OutputResult, TickSummaryRow};

/// A sink for simulation output rows.
///
/// The observer never propagates these errors.  It keeps the first one,
/// retrievable with
/// [`SimOutputObserver::take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    fn write_completion(&mut self, row: &OrderCompletionRow) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write one snapshot batch, one row per forklift.
    fn write_snapshots(&mut self, rows: &[ForkliftSnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Calling it again after the first time does nothing.
    fn finish(&mut self) -> OutputResult<()>;
}
