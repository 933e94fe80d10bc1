//! Grid coordinates, goods colors and the loading/unloading role tag.

use std::fmt;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// A cell on the warehouse floor grid.  `(0, 0)` is the bottom-left corner.
///
/// Signed so neighbour arithmetic never underflows; bounds are the layout's
/// concern.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (L1) distance.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four orthogonal neighbours (up, down, right, left).
    #[inline]
    pub fn neighbors4(self) -> [Cell; 4] {
        [
            Cell::new(self.x, self.y + 1),
            Cell::new(self.x, self.y - 1),
            Cell::new(self.x + 1, self.y),
            Cell::new(self.x - 1, self.y),
        ]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Color ─────────────────────────────────────────────────────────────────────

/// Goods color.  Every rack stores exactly one color; orders are split
/// across all of them.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Orange,
}

impl Color {
    pub const COUNT: usize = 5;

    /// All colors in their canonical order.
    pub const ALL: [Color; Color::COUNT] =
        [Color::Red, Color::Green, Color::Yellow, Color::Blue, Color::Orange];

    /// Position in [`Color::ALL`], for per-color arrays.
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red    => "red",
            Color::Green  => "green",
            Color::Yellow => "yellow",
            Color::Blue   => "blue",
            Color::Orange => "orange",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Role ──────────────────────────────────────────────────────────────────────

/// Direction of goods flow, shared by docks and forklifts.
///
/// - `Unloading`: inbound truck bay → rack.  The dock's order is supply.
/// - `Loading`:   rack → outbound truck bay.  The dock's order is demand.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    Unloading,
    Loading,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Unloading, Role::Loading];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Unloading => "unloading",
            Role::Loading   => "loading",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
