//! The slice of the world a forklift sees while it steps.

use wh_core::Tick;
use wh_inventory::Inventory;
use wh_spatial::{Layout, PathFinder};

/// Borrowed view of the floor for one forklift step.
///
/// Built fresh for every step by the model; forklifts never hold on to it.
pub struct FleetContext<'a> {
    pub tick:        Tick,
    pub layout:      &'a dyn Layout,
    pub path_finder: &'a dyn PathFinder,
    pub inventory:   &'a mut Inventory,
}

impl<'a> FleetContext<'a> {
    pub fn new(
        tick:        Tick,
        layout:      &'a dyn Layout,
        path_finder: &'a dyn PathFinder,
        inventory:   &'a mut Inventory,
    ) -> Self {
        Self { tick, layout, path_finder, inventory }
    }
}
