//! Integration tests for wh-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{ForkliftSnapshotRow, OrderCompletionRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    fn snap_row(forklift: u32, tick: u64, dock: Option<u32>) -> ForkliftSnapshotRow {
        ForkliftSnapshotRow {
            forklift,
            tick,
            role:    "loading",
            state:   if dock.is_some() { "GOING_TO_RACK" } else { "IDLE" },
            x:       forklift as i32,
            y:       1,
            carried: 0,
            dock,
            color:   dock.map(|_| "red"),
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("order_completions.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("forklift_snapshots.csv").exists());
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(dir.path().join("order_completions.csv")),
            ["dock", "role", "seq", "units", "assigned_at", "completed_at", "duration"],
        );
        assert_eq!(
            headers(dir.path().join("tick_summaries.csv")),
            ["tick", "moved", "idle", "carrying", "free_docks", "queued", "assigned", "completed"],
        );
        assert_eq!(
            headers(dir.path().join("forklift_snapshots.csv")),
            ["forklift", "tick", "role", "state", "x", "y", "carried", "dock", "color"],
        );
    }

    #[test]
    fn completion_row_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = OrderCompletionRow {
            dock:         1,
            role:         "unloading",
            seq:          4,
            units:        12,
            assigned_at:  100,
            completed_at: 340,
            duration:     240,
        };
        w.write_completion(&row).unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("order_completions.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "unloading");
        assert_eq!(&rows[0][6], "240");
    }

    #[test]
    fn snapshot_without_job_leaves_blanks() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 10, None), snap_row(1, 10, Some(2))]).unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("forklift_snapshots.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][3], "IDLE");
        assert_eq!(&rows[0][7], "");
        assert_eq!(&rows[0][8], "");
        assert_eq!(&rows[1][7], "2");
        assert_eq!(&rows[1][8], "red");
    }

    #[test]
    fn tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = TickSummaryRow {
            tick:       3,
            moved:      2,
            idle:       1,
            carrying:   1,
            free_docks: 0,
            queued:     5,
            assigned:   0,
            completed:  1,
        };
        w.write_tick_summary(&row).unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("tick_summaries.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][5], "5");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }
}

#[cfg(test)]
mod rows {
    use wh_core::{Cell, DockId, ForkliftId, Role, Tick};
    use wh_fleet::ForkLift;
    use wh_inventory::CompletedOrder;

    use crate::row::{ForkliftSnapshotRow, OrderCompletionRow};

    #[test]
    fn completion_row_from_order() {
        let order = CompletedOrder {
            dock:         DockId(3),
            role:         Role::Loading,
            seq:          7,
            units:        9,
            assigned_at:  Tick(50),
            completed_at: Tick(125),
        };
        let row = OrderCompletionRow::from(&order);
        assert_eq!(row.dock, 3);
        assert_eq!(row.role, "loading");
        assert_eq!(row.duration, 75);
    }

    #[test]
    fn idle_forklift_snapshot() {
        let f = ForkLift::new(ForkliftId(2), Role::Unloading, Cell::new(28, 15));
        let row = ForkliftSnapshotRow::new(Tick(40), &f);
        assert_eq!(row.forklift, 2);
        assert_eq!(row.state, "IDLE");
        assert_eq!((row.x, row.y), (28, 15));
        assert_eq!(row.carried, 0);
        assert_eq!(row.dock, None);
        assert_eq!(row.color, None::<&str>);
    }
}

#[cfg(test)]
mod integration {
    use wh_core::{Cell, Color, Role, SimConfig};
    use wh_inventory::Order;
    use wh_sim::{ModelBuilder, NoOrders};
    use wh_spatial::GridLayoutBuilder;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;

    #[test]
    fn integration_csv() {
        let mut b = GridLayoutBuilder::new(7, 3);
        b.add_dock(Cell::new(6, 1), Role::Unloading).unwrap();
        b.add_rack(Cell::new(3, 2), Color::Red).unwrap();
        b.add_standby(Cell::new(5, 1), Role::Unloading);
        let layout = b.build().unwrap();

        let config = SimConfig {
            total_ticks:           60,
            seed:                  1,
            initial_fill_ratio:    0.0,
            rack_capacity:         5,
            output_interval_ticks: 10,
            ..SimConfig::default()
        };
        let mut model = ModelBuilder::new(config, layout)
            .order_source(NoOrders)
            .submit_order(Role::Unloading, Order::single(Color::Red, 2))
            .build()
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        model.run(&mut obs);
        assert!(obs.take_error().is_none());

        let count = |name: &str| {
            let mut rdr = csv::Reader::from_path(dir.path().join(name)).unwrap();
            rdr.records().count()
        };
        assert_eq!(count("tick_summaries.csv"), 60);
        // One forklift, snapshots at ticks 0, 10, …, 50.
        assert_eq!(count("forklift_snapshots.csv"), 6);
        assert_eq!(count("order_completions.csv"), 1);
    }
}
