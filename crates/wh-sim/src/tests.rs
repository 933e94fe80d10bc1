//! Unit tests for wh-sim.

use wh_core::{Cell, Color, Role, SimConfig, Tick};
use wh_inventory::Order;
use wh_spatial::{AStarPathFinder, GridLayout, GridLayoutBuilder};

use crate::{ModelBuilder, NoOrders, WarehouseModel};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 7×3 floor: one dock per role, a red and a blue rack, two loading
/// forklifts and one unloading forklift.
///
/// ```text
///   2 . s . R . . .
///   1 L s . . . s U
///   0 . . . B . . .
///     0 1 2 3 4 5 6
/// ```
fn small_floor() -> GridLayout {
    let mut b = GridLayoutBuilder::new(7, 3);
    b.add_dock(Cell::new(0, 1), Role::Loading).unwrap();
    b.add_dock(Cell::new(6, 1), Role::Unloading).unwrap();
    b.add_rack(Cell::new(3, 2), Color::Red).unwrap();
    b.add_rack(Cell::new(3, 0), Color::Blue).unwrap();
    b.add_standby(Cell::new(1, 1), Role::Loading);
    b.add_standby(Cell::new(1, 2), Role::Loading);
    b.add_standby(Cell::new(5, 1), Role::Unloading);
    b.build().unwrap()
}

fn config(capacity: u32, fill: f32) -> SimConfig {
    SimConfig {
        total_ticks: 500,
        rack_capacity: capacity,
        initial_fill_ratio: fill,
        ..SimConfig::default()
    }
}

type Model = WarehouseModel<AStarPathFinder, NoOrders>;

fn scripted(capacity: u32, fill: f32, orders: &[(Role, Order)]) -> Model {
    let mut builder = ModelBuilder::new(config(capacity, fill), small_floor()).order_source(NoOrders);
    for (role, order) in orders {
        builder = builder.submit_order(*role, order.clone());
    }
    builder.build().unwrap()
}

/// Step until `done` holds, checking invariants after every tick.
fn run_until(model: &mut Model, max: u64, done: impl Fn(&Model) -> bool) {
    for _ in 0..max {
        model.step();
        model.check_invariants();
        if done(model) {
            return;
        }
    }
    panic!("condition not reached within {max} ticks");
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;
    use crate::SimError;

    #[test]
    fn inventory_mirrors_layout() {
        let model = scripted(6, 0.5, &[]);
        assert_eq!(model.inventory().docks().len(), 2);
        assert_eq!(model.inventory().racks().len(), 2);
        assert!(model.inventory().racks().iter().all(|r| r.occupancy() == 3 && r.capacity() == 6));
    }

    #[test]
    fn one_forklift_per_standby_cell() {
        let model = scripted(5, 0.0, &[]);
        let fleet = model.forklifts();
        assert_eq!(fleet.len(), 3);
        assert_eq!(fleet.iter().filter(|f| f.role() == Role::Loading).count(), 2);
        assert!(fleet.iter().all(|f| f.position() == f.standby()));
    }

    #[test]
    fn invalid_config_rejected() {
        let bad = SimConfig { rack_capacity: 0, ..SimConfig::default() };
        let err = ModelBuilder::new(bad, small_floor()).build().err().unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn initial_orders_go_to_docks_then_queue() {
        let model = scripted(5, 0.0, &[
            (Role::Unloading, Order::single(Color::Red, 1)),
            (Role::Unloading, Order::single(Color::Blue, 1)),
            (Role::Unloading, Order::empty()),
        ]);
        assert!(!model.inventory().docks()[1].is_free());
        assert_eq!(model.queued(Role::Unloading), 1);
        assert_eq!(model.queued(Role::Loading), 0);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;
    use wh_fleet::ForkliftState;

    #[test]
    fn unloading_three_red_units() {
        let mut model = scripted(5, 0.0, &[(Role::Unloading, Order::single(Color::Red, 3))]);
        run_until(&mut model, 200, |m| m.stats().completed(Role::Unloading) == 1);

        let red = &model.inventory().racks()[0];
        assert_eq!(red.color(), Color::Red);
        assert_eq!(red.occupancy(), 3);
        assert!(model.inventory().docks()[1].is_free());
        assert_eq!(model.inventory().docks()[1].completed_count(), 1);
    }

    #[test]
    fn loading_without_stock_rolls_back_until_restocked() {
        let mut model = scripted(5, 0.0, &[(Role::Loading, Order::single(Color::Blue, 2))]);
        for _ in 0..5 {
            model.step();
            model.check_invariants();
        }
        let dock = &model.inventory().docks()[0];
        assert_eq!(dock.reservation_ledger().unwrap().amount(Color::Blue), 2);
        assert_eq!(dock.current_order().unwrap().amount(Color::Blue), 2);
        for f in model.forklifts().iter().filter(|f| f.role() == Role::Loading) {
            assert_eq!(f.state(), ForkliftState::Idle);
            assert_eq!(f.position(), f.standby());
        }

        model.inventory_mut().rack_mut(wh_core::RackId(1)).add(2).unwrap();
        run_until(&mut model, 200, |m| m.stats().completed(Role::Loading) == 1);
        assert_eq!(model.inventory().racks()[1].occupancy(), 0);
    }

    #[test]
    fn single_unit_claimed_by_one_forklift() {
        let mut model = scripted(5, 1.0, &[(Role::Loading, Order::single(Color::Red, 1))]);
        model.step();
        model.check_invariants();

        let bound: Vec<_> = model.forklifts().iter().filter(|f| f.bound_dock().is_some()).collect();
        assert_eq!(bound.len(), 1);
        assert_eq!(bound[0].bound_color(), Some(Color::Red));
        let dock = &model.inventory().docks()[0];
        assert_eq!(dock.reservation_ledger().unwrap().total(), 0);
        assert_eq!(model.inventory().racks()[0].reserved(), 1);

        run_until(&mut model, 100, |m| m.stats().completed(Role::Loading) == 1);
        assert_eq!(model.inventory().racks()[0].occupancy(), 4);
    }

    #[test]
    fn two_forklifts_drain_a_mixed_order() {
        let order = Order::from_amounts([(Color::Red, 3), (Color::Blue, 3)]);
        let mut model = scripted(5, 1.0, &[(Role::Loading, order)]);
        run_until(&mut model, 300, |m| m.stats().completed(Role::Loading) == 1);
        let racks = model.inventory().racks();
        assert_eq!(racks[0].occupancy() + racks[1].occupancy(), 4);
    }

    #[test]
    fn queued_orders_are_served_in_turn() {
        let mut model = scripted(10, 0.0, &[
            (Role::Unloading, Order::single(Color::Red, 2)),
            (Role::Unloading, Order::single(Color::Blue, 2)),
            (Role::Unloading, Order::single(Color::Red, 1)),
        ]);
        assert_eq!(model.queued(Role::Unloading), 2);
        run_until(&mut model, 500, |m| m.stats().completed(Role::Unloading) == 3);

        assert_eq!(model.queued(Role::Unloading), 0);
        let racks = model.inventory().racks();
        assert_eq!(racks[0].occupancy(), 3);
        assert_eq!(racks[1].occupancy(), 2);
        assert_eq!(model.stats().histogram().values().sum::<u64>(), 3);
    }

    #[test]
    fn stock_drained_under_a_claim_recovers() {
        let mut model = scripted(5, 1.0, &[(Role::Loading, Order::single(Color::Red, 1))]);
        model.step();
        assert_eq!(model.inventory().racks()[0].reserved(), 1);

        model.inventory_mut().rack_mut(wh_core::RackId(0)).remove(5).unwrap();
        for _ in 0..50 {
            model.check_invariants();
            model.step();
        }
        model.check_invariants();

        let dock = &model.inventory().docks()[0];
        assert_eq!(dock.reservation_ledger().unwrap().amount(Color::Red), 1);
        assert_eq!(model.inventory().racks()[0].reserved(), 0);
        assert_eq!(model.stats().total_completed(), 0);
    }

    #[test]
    fn rack_never_overfills() {
        // Four red units inbound, room for two.
        let mut model = scripted(2, 0.0, &[(Role::Unloading, Order::single(Color::Red, 4))]);
        for _ in 0..300 {
            model.step();
            model.check_invariants();
        }
        assert_eq!(model.inventory().racks()[0].occupancy(), 2);
        assert_eq!(model.stats().total_completed(), 0);
    }
}

// ── Orders ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod orders {
    use wh_core::{Role, SimRng, Tick};

    use crate::{NoOrders, OrderSource, PeriodicOrders};

    #[test]
    fn periodic_fires_on_interval() {
        let mut src = PeriodicOrders { interval: 10, min_units: 3, max_units: 3 };
        let mut rng = SimRng::new(1);
        let first = src.poll(Tick(0), Role::Loading, &mut rng).unwrap();
        assert_eq!(first.total(), 3);
        assert!(src.poll(Tick(5), Role::Loading, &mut rng).is_none());
        assert!(src.poll(Tick(20), Role::Unloading, &mut rng).is_some());
    }

    #[test]
    fn periodic_totals_within_bounds() {
        let mut src = PeriodicOrders { interval: 1, min_units: 5, max_units: 20 };
        let mut rng = SimRng::new(9);
        for t in 0..200 {
            let order = src.poll(Tick(t), Role::Unloading, &mut rng).unwrap();
            assert!((5..=20).contains(&order.total()));
        }
    }

    #[test]
    fn zero_interval_never_fires() {
        let mut src = PeriodicOrders { interval: 0, min_units: 1, max_units: 1 };
        let mut rng = SimRng::new(1);
        assert!(src.poll(Tick(0), Role::Loading, &mut rng).is_none());
        assert!(NoOrders.poll(Tick(0), Role::Loading, &mut rng).is_none());
    }
}

// ── Stats ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats {
    use wh_core::{DockId, Role, Tick};
    use wh_inventory::CompletedOrder;

    use crate::OrderStats;

    fn done(role: Role, from: u64, to: u64) -> CompletedOrder {
        CompletedOrder {
            dock: DockId(0),
            role,
            seq: 0,
            units: 1,
            assigned_at: Tick(from),
            completed_at: Tick(to),
        }
    }

    #[test]
    fn empty_stats() {
        let s = OrderStats::default();
        assert_eq!(s.total_completed(), 0);
        assert_eq!(s.mean_duration(), None);
        assert_eq!(s.max_duration(), None);
    }

    #[test]
    fn histogram_and_moments() {
        let mut s = OrderStats::default();
        s.record(&done(Role::Loading, 0, 10));
        s.record(&done(Role::Loading, 5, 15));
        s.record(&done(Role::Unloading, 0, 40));
        assert_eq!(s.completed(Role::Loading), 2);
        assert_eq!(s.completed(Role::Unloading), 1);
        assert_eq!(s.histogram().get(&10), Some(&2));
        assert_eq!(s.max_duration(), Some(40));
        assert_eq!(s.mean_duration(), Some(20.0));
    }
}

// ── Full floor ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod reference_floor {
    use wh_fleet::ForkLift;
    use wh_inventory::{CompletedOrder, Inventory};
    use wh_spatial::LayoutConfig;

    use super::*;
    use crate::{OrderStats, SimObserver, TickSummary};

    #[derive(Default)]
    struct Counter {
        ticks:     u64,
        snapshots: u64,
        completed: u64,
        end:       Option<Tick>,
    }

    impl SimObserver for Counter {
        fn on_order_completed(&mut self, _order: &CompletedOrder) {
            self.completed += 1;
        }
        fn on_tick_end(&mut self, _summary: &TickSummary) {
            self.ticks += 1;
        }
        fn on_snapshot(&mut self, _tick: Tick, forklifts: &[ForkLift], _inventory: &Inventory) {
            assert_eq!(forklifts.len(), 4);
            self.snapshots += 1;
        }
        fn on_sim_end(&mut self, final_tick: Tick, stats: &OrderStats) {
            assert_eq!(stats.total_completed(), self.completed);
            self.end = Some(final_tick);
        }
    }

    fn reference(ticks: u64, seed: u64) -> WarehouseModel<AStarPathFinder, crate::PeriodicOrders> {
        let layout = GridLayout::reference(&LayoutConfig::default()).unwrap();
        let config = SimConfig { total_ticks: ticks, seed, ..SimConfig::default() };
        ModelBuilder::new(config, layout).build().unwrap()
    }

    #[test]
    fn observer_sees_every_tick() {
        let mut model = reference(100, 42);
        let mut obs = Counter::default();
        model.run(&mut obs);
        assert_eq!(obs.ticks, 100);
        assert_eq!(obs.snapshots, 10);
        assert_eq!(obs.end, Some(Tick(100)));
    }

    #[test]
    fn both_roles_complete_orders() {
        let mut model = reference(2000, 42);
        for _ in 0..2000 {
            model.step();
            model.check_invariants();
        }
        assert!(model.stats().completed(Role::Loading) > 0);
        assert!(model.stats().completed(Role::Unloading) > 0);
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = reference(400, 7);
        let mut b = reference(400, 7);
        a.run(&mut crate::NoopObserver);
        b.run(&mut crate::NoopObserver);
        assert_eq!(a.stats(), b.stats());
        let pos = |m: &WarehouseModel<_, _>| m.forklifts().iter().map(|f| f.position()).collect::<Vec<_>>();
        assert_eq!(pos(&a), pos(&b));
        let occ = |m: &WarehouseModel<_, _>| m.inventory().racks().iter().map(|r| r.occupancy()).collect::<Vec<_>>();
        assert_eq!(occ(&a), occ(&b));
    }
}
