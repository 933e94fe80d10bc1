//! Plain data row types written by output backends.

use wh_core::Tick;
use wh_fleet::ForkLift;
use wh_inventory::CompletedOrder;
use wh_sim::TickSummary;

/// One finished order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCompletionRow {
    pub dock:         u32,
    pub role:         &'static str,
    pub seq:          u64,
    pub units:        u32,
    pub assigned_at:  u64,
    pub completed_at: u64,
    pub duration:     u64,
}

impl From<&CompletedOrder> for OrderCompletionRow {
    fn from(o: &CompletedOrder) -> Self {
        Self {
            dock:         o.dock.0,
            role:         o.role.as_str(),
            seq:          o.seq,
            units:        o.units,
            assigned_at:  o.assigned_at.0,
            completed_at: o.completed_at.0,
            duration:     o.duration(),
        }
    }
}

/// Fleet and dock counters for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:       u64,
    pub moved:      u32,
    pub idle:       u32,
    pub carrying:   u32,
    pub free_docks: u32,
    pub queued:     u32,
    pub assigned:   u32,
    pub completed:  u32,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:       s.tick.0,
            moved:      s.moved as u32,
            idle:       s.idle as u32,
            carrying:   s.carrying as u32,
            free_docks: s.free_docks as u32,
            queued:     s.queued as u32,
            assigned:   s.assigned as u32,
            completed:  s.completed.len() as u32,
        }
    }
}

/// Where one forklift is and what it is doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkliftSnapshotRow {
    pub forklift: u32,
    pub tick:     u64,
    pub role:     &'static str,
    pub state:    &'static str,
    pub x:        i32,
    pub y:        i32,
    pub carried:  u8,
    /// `None` while the forklift has no job.
    pub dock:     Option<u32>,
    pub color:    Option<&'static str>,
}

impl ForkliftSnapshotRow {
    pub fn new(tick: Tick, f: &ForkLift) -> Self {
        let pos = f.position();
        Self {
            forklift: f.id().0,
            tick:     tick.0,
            role:     f.role().as_str(),
            state:    f.label(),
            x:        pos.x,
            y:        pos.y,
            carried:  f.carried_units(),
            dock:     f.bound_dock().map(|d| d.0),
            color:    f.bound_color().map(|c| c.as_str()),
        }
    }
}
