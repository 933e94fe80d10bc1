//! The floor layout: which cells hold racks and docks, which are lanes.
//!
//! The core never computes geometry itself; it asks a [`Layout`].  The
//! default implementation, [`GridLayout`], is a bounded rectangle whose
//! blocked cells are exactly the rack and dock footprints.

use rustc_hash::FxHashMap;

use wh_core::{Cell, Color, Role};

use crate::{SpatialError, SpatialResult};

// ── Layout trait ──────────────────────────────────────────────────────────────

/// Read-only view of the floor used by forklifts and the path finder.
pub trait Layout: Send + Sync {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// `true` if a forklift may drive through `cell`.  Out-of-bounds, rack
    /// and dock cells are never navigable.
    fn is_navigable(&self, cell: Cell) -> bool;

    fn is_rack(&self, cell: Cell) -> bool;

    #[inline]
    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as u32) < self.width()
            && (cell.y as u32) < self.height()
    }

    /// The lane cell a forklift parks on to work `site` (a rack or dock).
    ///
    /// First navigable neighbour in [`Cell::neighbors4`] order.
    fn access_cell(&self, site: Cell) -> Option<Cell> {
        site.neighbors4().into_iter().find(|&n| self.is_navigable(n))
    }
}

// ── Sites ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RackSite {
    pub cell:  Cell,
    pub color: Color,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DockSite {
    pub cell: Cell,
    pub role: Role,
}

/// Where a forklift of `role` is spawned and returns to when idle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StandbySite {
    pub cell: Cell,
    pub role: Role,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Blocked {
    Rack,
    Dock,
}

// ── GridLayout ────────────────────────────────────────────────────────────────

/// A rectangular floor.  Build with [`GridLayoutBuilder`] or
/// [`GridLayout::reference`][crate::LayoutConfig].
#[derive(Clone, Debug)]
pub struct GridLayout {
    width:   u32,
    height:  u32,
    blocked: FxHashMap<Cell, Blocked>,
    racks:   Vec<RackSite>,
    docks:   Vec<DockSite>,
    standby: Vec<StandbySite>,
}

impl GridLayout {
    /// Rack table, in insertion order.
    pub fn racks(&self) -> &[RackSite] {
        &self.racks
    }

    /// Dock table, in insertion order.  Forklifts scan docks in this order.
    pub fn docks(&self) -> &[DockSite] {
        &self.docks
    }

    pub fn standby_sites(&self) -> &[StandbySite] {
        &self.standby
    }

    pub fn is_dock(&self, cell: Cell) -> bool {
        self.blocked.get(&cell) == Some(&Blocked::Dock)
    }

    /// Number of navigable lane cells.
    pub fn lane_count(&self) -> usize {
        (self.width as usize * self.height as usize) - self.blocked.len()
    }
}

impl Layout for GridLayout {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn is_navigable(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.blocked.contains_key(&cell)
    }

    #[inline]
    fn is_rack(&self, cell: Cell) -> bool {
        self.blocked.get(&cell) == Some(&Blocked::Rack)
    }
}

// ── GridLayoutBuilder ─────────────────────────────────────────────────────────

/// Construct a [`GridLayout`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use wh_core::{Cell, Color, Role};
/// use wh_spatial::{GridLayoutBuilder, Layout};
///
/// let mut b = GridLayoutBuilder::new(5, 3);
/// b.add_rack(Cell::new(0, 1), Color::Red).unwrap();
/// b.add_dock(Cell::new(4, 1), Role::Unloading).unwrap();
/// b.add_standby(Cell::new(3, 1), Role::Unloading);
/// let layout = b.build().unwrap();
/// assert!(layout.is_rack(Cell::new(0, 1)));
/// assert!(!layout.is_navigable(Cell::new(4, 1)));
/// ```
pub struct GridLayoutBuilder {
    width:   u32,
    height:  u32,
    blocked: FxHashMap<Cell, Blocked>,
    racks:   Vec<RackSite>,
    docks:   Vec<DockSite>,
    standby: Vec<StandbySite>,
}

impl GridLayoutBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            blocked: FxHashMap::default(),
            racks:   Vec::new(),
            docks:   Vec::new(),
            standby: Vec::new(),
        }
    }

    pub fn add_rack(&mut self, cell: Cell, color: Color) -> SpatialResult<()> {
        self.block(cell, Blocked::Rack)?;
        self.racks.push(RackSite { cell, color });
        Ok(())
    }

    pub fn add_dock(&mut self, cell: Cell, role: Role) -> SpatialResult<()> {
        self.block(cell, Blocked::Dock)?;
        self.docks.push(DockSite { cell, role });
        Ok(())
    }

    /// Register a standby cell.  Checked for navigability in `build`, since
    /// racks added later may still cover it.
    pub fn add_standby(&mut self, cell: Cell, role: Role) {
        self.standby.push(StandbySite { cell, role });
    }

    /// Validate standby cells and produce the layout.
    pub fn build(self) -> SpatialResult<GridLayout> {
        let layout = GridLayout {
            width:   self.width,
            height:  self.height,
            blocked: self.blocked,
            racks:   self.racks,
            docks:   self.docks,
            standby: self.standby,
        };
        for site in &layout.standby {
            if !layout.in_bounds(site.cell) {
                return Err(SpatialError::OutOfBounds(site.cell));
            }
            if !layout.is_navigable(site.cell) {
                return Err(SpatialError::Occupied(site.cell));
            }
        }
        for dock in &layout.docks {
            if layout.access_cell(dock.cell).is_none() {
                return Err(SpatialError::NoAccess(dock.cell));
            }
        }
        Ok(layout)
    }

    fn block(&mut self, cell: Cell, kind: Blocked) -> SpatialResult<()> {
        let in_bounds = cell.x >= 0
            && cell.y >= 0
            && (cell.x as u32) < self.width
            && (cell.y as u32) < self.height;
        if !in_bounds {
            return Err(SpatialError::OutOfBounds(cell));
        }
        if self.blocked.contains_key(&cell) {
            return Err(SpatialError::Occupied(cell));
        }
        self.blocked.insert(cell, kind);
        Ok(())
    }
}
