//! Unit tests for wh-spatial.
//!
//! All tests use hand-built grids.

#[cfg(test)]
mod helpers {
    use wh_core::{Cell, Color};

    use crate::{GridLayout, GridLayoutBuilder};

    /// 5×5 open floor with a single rack at (1, 2).
    ///
    /// ```text
    ///   4 . . . . .
    ///   3 . . . . .
    ///   2 . R . . .
    ///   1 . . . . .
    ///   0 . . . . .
    ///     0 1 2 3 4
    /// ```
    pub fn five_by_five_one_obstacle() -> GridLayout {
        let mut b = GridLayoutBuilder::new(5, 5);
        b.add_rack(Cell::new(1, 2), Color::Red).unwrap();
        b.build().unwrap()
    }

    pub fn open(width: u32, height: u32) -> GridLayout {
        GridLayoutBuilder::new(width, height).build().unwrap()
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod layout {
    use wh_core::{Cell, Color, Role};

    use crate::{GridLayoutBuilder, Layout, SpatialError};

    #[test]
    fn racks_and_docks_block_lanes() {
        let mut b = GridLayoutBuilder::new(4, 4);
        b.add_rack(Cell::new(1, 1), Color::Blue).unwrap();
        b.add_dock(Cell::new(3, 0), Role::Loading).unwrap();
        let layout = b.build().unwrap();

        assert!(layout.is_rack(Cell::new(1, 1)));
        assert!(!layout.is_navigable(Cell::new(1, 1)));
        assert!(layout.is_dock(Cell::new(3, 0)));
        assert!(!layout.is_rack(Cell::new(3, 0)));
        assert!(!layout.is_navigable(Cell::new(3, 0)));
        assert!(layout.is_navigable(Cell::new(0, 0)));
        assert_eq!(layout.lane_count(), 14);
    }

    #[test]
    fn out_of_bounds_is_not_navigable() {
        let layout = super::helpers::open(3, 3);
        assert!(!layout.is_navigable(Cell::new(-1, 0)));
        assert!(!layout.is_navigable(Cell::new(0, 3)));
        assert!(!layout.is_navigable(Cell::new(3, 0)));
    }

    #[test]
    fn duplicate_site_rejected() {
        let mut b = GridLayoutBuilder::new(4, 4);
        b.add_rack(Cell::new(1, 1), Color::Blue).unwrap();
        assert_eq!(
            b.add_dock(Cell::new(1, 1), Role::Loading),
            Err(SpatialError::Occupied(Cell::new(1, 1))),
        );
        assert_eq!(
            b.add_rack(Cell::new(9, 9), Color::Red),
            Err(SpatialError::OutOfBounds(Cell::new(9, 9))),
        );
    }

    #[test]
    fn standby_on_rack_rejected() {
        let mut b = GridLayoutBuilder::new(4, 4);
        b.add_standby(Cell::new(2, 2), Role::Unloading);
        b.add_rack(Cell::new(2, 2), Color::Green).unwrap();
        assert_eq!(b.build().unwrap_err(), SpatialError::Occupied(Cell::new(2, 2)));
    }

    #[test]
    fn walled_in_dock_rejected() {
        let mut b = GridLayoutBuilder::new(2, 2);
        b.add_dock(Cell::new(0, 0), Role::Loading).unwrap();
        b.add_rack(Cell::new(1, 0), Color::Red).unwrap();
        b.add_rack(Cell::new(0, 1), Color::Red).unwrap();
        assert_eq!(b.build().unwrap_err(), SpatialError::NoAccess(Cell::new(0, 0)));
    }

    #[test]
    fn access_cell_is_a_navigable_neighbour() {
        let layout = super::helpers::five_by_five_one_obstacle();
        let access = layout.access_cell(Cell::new(1, 2)).unwrap();
        assert_eq!(access.manhattan(Cell::new(1, 2)), 1);
        assert!(layout.is_navigable(access));
    }
}

// ── Reference floor ───────────────────────────────────────────────────────────

#[cfg(test)]
mod reference {
    use wh_core::{Cell, Color, Role};

    use crate::{GridLayout, Layout, LayoutConfig};

    #[test]
    fn default_floor_counts() {
        let layout = GridLayout::reference(&LayoutConfig::default()).unwrap();
        // 4 blocks × 5 rack rows × 10 racks.
        assert_eq!(layout.racks().len(), 200);
        assert_eq!(layout.docks().len(), 4);
        assert_eq!(layout.standby_sites().len(), 4);
        let unloading = layout.docks().iter().filter(|d| d.role == Role::Unloading).count();
        assert_eq!(unloading, 2);
    }

    #[test]
    fn racks_only_on_even_block_rows() {
        let layout = GridLayout::reference(&LayoutConfig::default()).unwrap();
        assert!(layout.is_rack(Cell::new(3, 4)));
        assert!(!layout.is_rack(Cell::new(3, 5)));
        assert!(layout.is_navigable(Cell::new(3, 5)));
        assert!(layout.is_rack(Cell::new(16, 17)));
    }

    #[test]
    fn docks_on_edges() {
        let layout = GridLayout::reference(&LayoutConfig::default()).unwrap();
        assert!(layout.is_dock(Cell::new(29, 14)));
        assert!(layout.is_dock(Cell::new(29, 15)));
        assert!(layout.is_dock(Cell::new(0, 0)));
        assert!(layout.is_dock(Cell::new(1, 0)));
        assert!(layout.is_navigable(Cell::new(28, 15)));
    }

    #[test]
    fn colors_cycle_per_row() {
        let layout = GridLayout::reference(&LayoutConfig::default()).unwrap();
        let first_row: Vec<Color> = layout.racks().iter().take(10).map(|r| r.color).collect();
        assert!(first_row.iter().all(|&c| c == Color::Red));
        assert_eq!(layout.racks()[10].color, Color::Green);
        for color in Color::ALL {
            assert!(layout.racks().iter().any(|r| r.color == color));
        }
    }
}

// ── A* ────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod astar {
    use wh_core::Cell;

    use crate::{AStarPathFinder, GridLayoutBuilder, PathFinder, SpatialError};

    fn assert_connected(cells: &[Cell]) {
        for w in cells.windows(2) {
            assert_eq!(w[0].manhattan(w[1]), 1, "non-adjacent step {w:?}");
        }
    }

    #[test]
    fn start_equals_goal() {
        let layout = super::helpers::open(5, 5);
        let p = AStarPathFinder.route(&layout, Cell::new(2, 2), Cell::new(2, 2)).unwrap();
        assert_eq!(p.cells(), &[Cell::new(2, 2)]);
        assert!(p.is_trivial());
        assert!(p.into_steps().is_empty());
    }

    #[test]
    fn open_grid_is_manhattan_optimal() {
        let layout = super::helpers::open(6, 6);
        let pairs = [
            (Cell::new(0, 0), Cell::new(5, 5)),
            (Cell::new(5, 0), Cell::new(0, 3)),
            (Cell::new(2, 2), Cell::new(2, 5)),
        ];
        for (a, b) in pairs {
            let p = AStarPathFinder.route(&layout, a, b).unwrap();
            assert_eq!(p.hops() as u32, a.manhattan(b));
            assert_eq!(p.start(), a);
            assert_eq!(p.goal(), b);
            assert_connected(p.cells());
        }
    }

    #[test]
    fn obstacle_forces_detour() {
        let layout = super::helpers::five_by_five_one_obstacle();
        let p = AStarPathFinder.route(&layout, Cell::new(0, 2), Cell::new(2, 2)).unwrap();
        // Straight line is blocked by the rack; shortest detour is 4 hops.
        assert_eq!(p.hops(), 4);
        assert!(!p.cells().contains(&Cell::new(1, 2)));
        assert_connected(p.cells());
    }

    #[test]
    fn unreachable_goal() {
        // A wall of racks splits the floor in two.
        let mut b = GridLayoutBuilder::new(5, 3);
        for y in 0..3 {
            b.add_rack(Cell::new(2, y), wh_core::Color::Red).unwrap();
        }
        let layout = b.build().unwrap();
        let err = AStarPathFinder.route(&layout, Cell::new(0, 0), Cell::new(4, 0)).unwrap_err();
        assert_eq!(err, SpatialError::PathNotFound { from: Cell::new(0, 0), to: Cell::new(4, 0) });
    }

    #[test]
    fn blocked_goal_is_not_found() {
        let layout = super::helpers::five_by_five_one_obstacle();
        assert!(AStarPathFinder.route(&layout, Cell::new(0, 0), Cell::new(1, 2)).is_err());
    }

    #[test]
    fn into_steps_drops_start() {
        let layout = super::helpers::open(4, 1);
        let p = AStarPathFinder.route(&layout, Cell::new(0, 0), Cell::new(3, 0)).unwrap();
        let steps: Vec<Cell> = p.into_steps().into_iter().collect();
        assert_eq!(steps, vec![Cell::new(1, 0), Cell::new(2, 0), Cell::new(3, 0)]);
    }

    #[test]
    fn custom_predicate() {
        // Only the bottom row and right column are allowed.
        let allowed = |c: Cell| (c.y == 0 && (0..4).contains(&c.x)) || (c.x == 3 && (0..4).contains(&c.y));
        let p = AStarPathFinder.find_path(Cell::new(0, 0), Cell::new(3, 3), &allowed).unwrap();
        assert_eq!(p.hops(), 6);
        assert!(p.cells().iter().all(|&c| allowed(c)));
    }
}
