//! Unit tests for wh-core primitives.

#[cfg(test)]
mod ids {
    use crate::{DockId, ForkliftId, RackId};

    #[test]
    fn index_roundtrip() {
        let id = ForkliftId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(ForkliftId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(DockId(0) < DockId(1));
        assert!(RackId(100) > RackId(99));
    }

    #[test]
    fn display() {
        assert_eq!(ForkliftId(7).to_string(), "ForkliftId(7)");
    }
}

#[cfg(test)]
mod grid {
    use crate::{Cell, Color, Role};

    #[test]
    fn manhattan_distance() {
        assert_eq!(Cell::new(0, 0).manhattan(Cell::new(3, 4)), 7);
        assert_eq!(Cell::new(-2, 5).manhattan(Cell::new(1, 1)), 7);
        assert_eq!(Cell::new(4, 4).manhattan(Cell::new(4, 4)), 0);
    }

    #[test]
    fn neighbors_are_one_step_away() {
        let c = Cell::new(2, 3);
        for n in c.neighbors4() {
            assert_eq!(c.manhattan(n), 1);
        }
    }

    #[test]
    fn color_indices_match_all() {
        for (i, c) in Color::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        assert_eq!(Color::Blue.to_string(), "blue");
    }

    #[test]
    fn role_display() {
        assert_eq!(Role::Unloading.to_string(), "unloading");
        assert_eq!(Role::Loading.index(), 1);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(15).since(Tick(10)), 5);
        assert_eq!(Tick(3).since(Tick(10)), 0);
    }

    #[test]
    fn is_every() {
        assert!(Tick(0).is_every(5));
        assert!(Tick(10).is_every(5));
        assert!(!Tick(11).is_every(5));
        assert!(!Tick(0).is_every(0));
    }

    #[test]
    fn clock_advances() {
        let mut clock = SimClock::new();
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.to_string(), "T2");
    }
}

#[cfg(test)]
mod config {
    use crate::SimConfig;

    #[test]
    fn default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
        assert_eq!(SimConfig::default().rack_capacity, 15);
    }

    #[test]
    fn rejects_bad_fill_ratio() {
        let cfg = SimConfig { initial_fill_ratio: 1.5, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_inverted_order_bounds() {
        let cfg = SimConfig { min_order_units: 10, max_order_units: 3, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn initial_fill_rounds() {
        let cfg = SimConfig { rack_capacity: 15, initial_fill_ratio: 0.5, ..SimConfig::default() };
        assert_eq!(cfg.initial_rack_fill(), 8);
        let empty = SimConfig { initial_fill_ratio: 0.0, ..SimConfig::default() };
        assert_eq!(empty.initial_rack_fill(), 0);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentRng, ForkliftId, SimRng};

    #[test]
    fn same_seed_same_sequence() {
        let picks: Vec<u32> = (0..1000).collect();
        let mut a = AgentRng::new(7, ForkliftId(3));
        let mut b = AgentRng::new(7, ForkliftId(3));
        for _ in 0..16 {
            assert_eq!(a.choose(&picks), b.choose(&picks));
        }
    }

    #[test]
    fn different_forklifts_diverge() {
        let picks: Vec<u32> = (0..1000).collect();
        let mut a = AgentRng::new(7, ForkliftId(0));
        let mut b = AgentRng::new(7, ForkliftId(1));
        let sa: Vec<u32> = (0..8).map(|_| *a.choose(&picks).unwrap()).collect();
        let sb: Vec<u32> = (0..8).map(|_| *b.choose(&picks).unwrap()).collect();
        assert_ne!(sa, sb);
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = AgentRng::new(1, ForkliftId(0));
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[9]), Some(&9));
    }

    #[test]
    fn shuffle_is_permutation() {
        let mut rng = SimRng::new(11);
        let mut v: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
