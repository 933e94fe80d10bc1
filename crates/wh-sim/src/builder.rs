//! Fluent builder for constructing a [`WarehouseModel`].

use std::collections::VecDeque;

use tracing::{info, warn};

use wh_core::{AgentRng, ForkliftId, Role, SimClock, SimConfig, SimRng};
use wh_fleet::ForkLift;
use wh_inventory::{Inventory, Order};
use wh_spatial::{AStarPathFinder, GridLayout, PathFinder};

use crate::{OrderSource, OrderStats, PeriodicOrders, SimResult, WarehouseModel};

/// Fluent builder for [`WarehouseModel<P, S>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, order cadence, rack capacity, …
/// - [`GridLayout`]: racks, docks and standby cells (e.g.
///   [`GridLayout::reference`])
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                                  |
/// |-------------------------|------------------------------------------|
/// | `.path_finder(p)`       | [`AStarPathFinder`]                      |
/// | `.order_source(s)`      | [`PeriodicOrders::from_config`]          |
/// | `.submit_order(r, o)`   | no orders at tick 0                      |
///
/// # Example
///
/// ```rust,ignore
/// let mut model = ModelBuilder::new(config, layout)
///     .order_source(NoOrders)
///     .submit_order(Role::Unloading, Order::single(Color::Red, 3))
///     .build()?;
/// model.run(&mut NoopObserver);
/// ```
pub struct ModelBuilder<P: PathFinder = AStarPathFinder, S: OrderSource = PeriodicOrders> {
    config:      SimConfig,
    layout:      GridLayout,
    path_finder: P,
    orders:      S,
    initial:     Vec<(Role, Order)>,
}

impl ModelBuilder {
    /// Create a builder with A* routing and periodic orders taken from
    /// `config`.
    pub fn new(config: SimConfig, layout: GridLayout) -> Self {
        let orders = PeriodicOrders::from_config(&config);
        Self {
            config,
            layout,
            path_finder: AStarPathFinder,
            orders,
            initial: Vec::new(),
        }
    }
}

impl<P: PathFinder, S: OrderSource> ModelBuilder<P, S> {
    pub fn path_finder<P2: PathFinder>(self, path_finder: P2) -> ModelBuilder<P2, S> {
        ModelBuilder {
            config: self.config,
            layout: self.layout,
            path_finder,
            orders: self.orders,
            initial: self.initial,
        }
    }

    pub fn order_source<S2: OrderSource>(self, orders: S2) -> ModelBuilder<P, S2> {
        ModelBuilder {
            config: self.config,
            layout: self.layout,
            path_finder: self.path_finder,
            orders,
            initial: self.initial,
        }
    }

    /// Queue an order to be placed before the first tick.
    pub fn submit_order(mut self, role: Role, order: Order) -> Self {
        self.initial.push((role, order));
        self
    }

    /// Validate the configuration, stock the racks, spawn one forklift per
    /// standby cell and return a ready-to-run model.
    pub fn build(self) -> SimResult<WarehouseModel<P, S>> {
        self.config.validate()?;

        // ── Inventory mirrors the layout, in layout order ─────────────────
        let mut inventory = Inventory::new();
        for site in self.layout.docks() {
            inventory.add_dock(site.role, site.cell);
        }
        let fill = self.config.initial_rack_fill();
        for site in self.layout.racks() {
            let rack = inventory.add_rack(site.cell, site.color, self.config.rack_capacity);
            if fill > 0 {
                inventory.rack_mut(rack).add(fill)?;
            }
        }

        // ── Fleet: one forklift per standby cell ──────────────────────────
        let mut forklifts = Vec::with_capacity(self.layout.standby_sites().len());
        let mut rngs = Vec::with_capacity(forklifts.capacity());
        for (i, site) in self.layout.standby_sites().iter().enumerate() {
            let id = ForkliftId(i as u32);
            forklifts.push(ForkLift::new(id, site.role, site.cell));
            rngs.push(AgentRng::new(self.config.seed, id));
        }
        for role in Role::ALL {
            let docks = inventory.docks_for(role).count();
            let fleet = forklifts.iter().filter(|f| f.role() == role).count();
            if docks > 0 && fleet == 0 {
                warn!(%role, docks, "docks have no forklift to serve them");
            }
        }

        info!(
            racks = inventory.racks().len(),
            docks = inventory.docks().len(),
            forklifts = forklifts.len(),
            fill,
            "warehouse built",
        );

        let turn_order = (0..forklifts.len()).collect();
        let mut model = WarehouseModel {
            sim_rng: SimRng::new(self.config.seed),
            clock: SimClock::new(),
            config: self.config,
            layout: self.layout,
            inventory,
            forklifts,
            rngs,
            path_finder: self.path_finder,
            orders: self.orders,
            queues: [VecDeque::new(), VecDeque::new()],
            stats: OrderStats::default(),
            turn_order,
        };
        for (role, order) in self.initial {
            model.submit_order(role, order);
        }
        Ok(model)
    }
}
