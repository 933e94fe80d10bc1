//! Path finding trait and default A* implementation.
//!
//! # Pluggability
//!
//! Forklifts route through the [`PathFinder`] trait, so applications can
//! swap in another search (jump point search, a cached all-pairs table)
//! without touching the state machines.
//!
//! # Cost model
//!
//! 4-connected grid, every edge costs 1.  The Manhattan heuristic is
//! admissible and consistent under that model, so A* returns a
//! shortest path.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use rustc_hash::FxHashMap;

use wh_core::Cell;

use crate::{Layout, SpatialError, SpatialResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered list of cells from start to goal, both included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn start(&self) -> Cell {
        self.cells[0]
    }

    pub fn goal(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    /// Number of moves needed to walk the path.
    pub fn hops(&self) -> usize {
        self.cells.len() - 1
    }

    /// `true` if the start is the goal.
    pub fn is_trivial(&self) -> bool {
        self.cells.len() == 1
    }

    /// The cells still to be entered, start excluded.  A forklift pops one
    /// per tick.
    pub fn into_steps(self) -> VecDeque<Cell> {
        let mut steps: VecDeque<Cell> = self.cells.into();
        steps.pop_front();
        steps
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable shortest-path search over navigable cells.
pub trait PathFinder: Send + Sync {
    /// Find a path from `start` to `goal` expanding only through cells for
    /// which `is_navigable` holds.
    ///
    /// `start` itself is exempt from the predicate (the caller is standing
    /// on it).  `start == goal` yields the single-cell path.  The predicate
    /// must reject all but finitely many cells, or an unreachable goal
    /// never terminates the search.
    fn find_path(
        &self,
        start:        Cell,
        goal:         Cell,
        is_navigable: &dyn Fn(Cell) -> bool,
    ) -> SpatialResult<Path>;

    /// [`find_path`](Self::find_path) over a layout's lanes.
    fn route(&self, layout: &dyn Layout, start: Cell, goal: Cell) -> SpatialResult<Path> {
        self.find_path(start, goal, &|c| layout.is_navigable(c))
    }
}

// ── AStarPathFinder ───────────────────────────────────────────────────────────

/// A* with unit edge costs and the Manhattan heuristic.
///
/// Frontier ties on `f` are broken by the smaller heuristic, then by cell
/// order, so results are deterministic for a given grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPathFinder;

impl PathFinder for AStarPathFinder {
    fn find_path(
        &self,
        start:        Cell,
        goal:         Cell,
        is_navigable: &dyn Fn(Cell) -> bool,
    ) -> SpatialResult<Path> {
        astar(start, goal, is_navigable)
    }
}

fn astar(start: Cell, goal: Cell, is_navigable: &dyn Fn(Cell) -> bool) -> SpatialResult<Path> {
    if start == goal {
        return Ok(Path { cells: vec![start] });
    }
    if !is_navigable(goal) {
        return Err(SpatialError::PathNotFound { from: start, to: goal });
    }

    // g[c] = best known hop count from start to c.
    let mut g: FxHashMap<Cell, u32> = FxHashMap::default();
    let mut came_from: FxHashMap<Cell, Cell> = FxHashMap::default();
    g.insert(start, 0);

    // Min-heap on (f, h, cell).
    let mut open: BinaryHeap<Reverse<(u32, u32, Cell)>> = BinaryHeap::new();
    let h0 = start.manhattan(goal);
    open.push(Reverse((h0, h0, start)));

    while let Some(Reverse((f, h, cell))) = open.pop() {
        if cell == goal {
            return Ok(reconstruct(&came_from, start, goal));
        }

        // Skip stale heap entries.
        let g_cell = f - h;
        if g.get(&cell).is_some_and(|&best| g_cell > best) {
            continue;
        }

        for next in cell.neighbors4() {
            if !is_navigable(next) {
                continue;
            }
            let tentative = g_cell + 1;
            if g.get(&next).is_none_or(|&best| tentative < best) {
                g.insert(next, tentative);
                came_from.insert(next, cell);
                let h_next = next.manhattan(goal);
                open.push(Reverse((tentative + h_next, h_next, next)));
            }
        }
    }

    Err(SpatialError::PathNotFound { from: start, to: goal })
}

fn reconstruct(came_from: &FxHashMap<Cell, Cell>, start: Cell, goal: Cell) -> Path {
    let mut cells = vec![goal];
    let mut cur = goal;
    while cur != start {
        cur = came_from[&cur];
        cells.push(cur);
    }
    cells.reverse();
    Path { cells }
}
