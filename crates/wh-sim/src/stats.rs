//! Order statistics and per-tick summaries.

use std::collections::BTreeMap;

use wh_core::{Role, Tick};
use wh_inventory::CompletedOrder;

/// Completion counts and a histogram of order durations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderStats {
    completed:      [u64; 2],
    /// Duration in ticks → number of orders.
    durations:      BTreeMap<u64, u64>,
    total_duration: u64,
}

impl OrderStats {
    pub fn record(&mut self, order: &CompletedOrder) {
        self.completed[order.role.index()] += 1;
        let d = order.duration();
        *self.durations.entry(d).or_insert(0) += 1;
        self.total_duration += d;
    }

    pub fn completed(&self, role: Role) -> u64 {
        self.completed[role.index()]
    }

    pub fn total_completed(&self) -> u64 {
        self.completed.iter().sum()
    }

    pub fn histogram(&self) -> &BTreeMap<u64, u64> {
        &self.durations
    }

    pub fn mean_duration(&self) -> Option<f64> {
        let n = self.total_completed();
        (n > 0).then(|| self.total_duration as f64 / n as f64)
    }

    pub fn max_duration(&self) -> Option<u64> {
        self.durations.keys().next_back().copied()
    }
}

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:       Tick,
    /// Forklifts that moved one cell.
    pub moved:      usize,
    /// Forklifts idle at the end of the tick.
    pub idle:       usize,
    /// Forklifts with a unit on the forks at the end of the tick.
    pub carrying:   usize,
    pub free_docks: usize,
    /// Orders waiting for a free dock, both roles.
    pub queued:     usize,
    /// Orders placed on a dock this tick.
    pub assigned:   usize,
    pub completed:  Vec<CompletedOrder>,
}
