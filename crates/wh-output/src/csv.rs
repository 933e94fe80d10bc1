//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `order_completions.csv`
//! - `tick_summaries.csv`
//! - `forklift_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ForkliftSnapshotRow, OrderCompletionRow, OutputResult, TickSummaryRow};

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    completions: Writer<File>,
    summaries:   Writer<File>,
    snapshots:   Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the three CSV files and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut completions = Writer::from_path(dir.join("order_completions.csv"))?;
        completions.write_record([
            "dock", "role", "seq", "units", "assigned_at", "completed_at", "duration",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick", "moved", "idle", "carrying", "free_docks", "queued", "assigned", "completed",
        ])?;

        let mut snapshots = Writer::from_path(dir.join("forklift_snapshots.csv"))?;
        snapshots.write_record(["forklift", "tick", "role", "state", "x", "y", "carried", "dock", "color"])?;

        Ok(Self {
            completions,
            summaries,
            snapshots,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_completion(&mut self, row: &OrderCompletionRow) -> OutputResult<()> {
        self.completions.write_record(&[
            row.dock.to_string(),
            row.role.to_owned(),
            row.seq.to_string(),
            row.units.to_string(),
            row.assigned_at.to_string(),
            row.completed_at.to_string(),
            row.duration.to_string(),
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.moved.to_string(),
            row.idle.to_string(),
            row.carrying.to_string(),
            row.free_docks.to_string(),
            row.queued.to_string(),
            row.assigned.to_string(),
            row.completed.to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[ForkliftSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.forklift.to_string(),
                row.tick.to_string(),
                row.role.to_owned(),
                row.state.to_owned(),
                row.x.to_string(),
                row.y.to_string(),
                row.carried.to_string(),
                row.dock.map(|d| d.to_string()).unwrap_or_default(),
                row.color.unwrap_or_default().to_owned(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.completions.flush()?;
        self.summaries.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
