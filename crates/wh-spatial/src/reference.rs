//! Reference floor generator.
//!
//! Four square rack blocks in a 2×2 arrangement.  Inside a block only the
//! even rows hold racks; the odd rows are the aisles forklifts use.
//! Unloading docks sit on the right edge around the vertical centre,
//! loading docks along the bottom row from the left.  Every dock gets a
//! standby cell next to it, and the model spawns one forklift per standby
//! cell.
//!
//! ```text
//!   y
//!   ▲  ┌──────────────────────────────┐
//!   │  │   ▓▓▓▓▓▓▓▓▓▓   ▓▓▓▓▓▓▓▓▓▓    │
//!   │  │   ▓▓▓▓▓▓▓▓▓▓   ▓▓▓▓▓▓▓▓▓▓   F│U
//!   │  │   ▓▓▓▓▓▓▓▓▓▓   ▓▓▓▓▓▓▓▓▓▓   F│U
//!   │  │   ▓▓▓▓▓▓▓▓▓▓   ▓▓▓▓▓▓▓▓▓▓    │
//!   │  │FF                            │
//!   │  └LL────────────────────────────┘
//!   └──────────────────────────────────▶ x
//! ```

use wh_core::{Cell, Color, Role};

use crate::{GridLayout, GridLayoutBuilder, SpatialResult};

/// Geometry of the reference floor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    pub width:         u32,
    pub height:        u32,
    /// Side length of one square rack block.
    pub block_size:    u32,
    /// Lane width between neighbouring blocks.
    pub block_spacing: u32,
    /// Bottom-left corner of the bottom-left block.
    pub origin:        (i32, i32),
    pub num_unloading: u32,
    pub num_loading:   u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width:         30,
            height:        30,
            block_size:    10,
            block_spacing: 3,
            origin:        (3, 4),
            num_unloading: 2,
            num_loading:   2,
        }
    }
}

impl LayoutConfig {
    /// Bottom-left corners of the four blocks, top row first.
    fn block_origins(&self) -> [Cell; 4] {
        let (sx, sy) = self.origin;
        let step = (self.block_size + self.block_spacing) as i32;
        [
            Cell::new(sx, sy + step),
            Cell::new(sx + step, sy + step),
            Cell::new(sx, sy),
            Cell::new(sx + step, sy),
        ]
    }
}

impl GridLayout {
    /// Generate the reference floor described in the module docs.
    ///
    /// Rack colors cycle through [`Color::ALL`] one rack row at a time.
    /// Rack cells falling outside the grid are skipped.
    pub fn reference(config: &LayoutConfig) -> SpatialResult<GridLayout> {
        let mut b = GridLayoutBuilder::new(config.width, config.height);
        let in_grid = |c: Cell| {
            c.x >= 0 && c.y >= 0 && (c.x as u32) < config.width && (c.y as u32) < config.height
        };

        let mut row_index = 0usize;
        for origin in config.block_origins() {
            for dy in (0..config.block_size as i32).step_by(2) {
                let color = Color::ALL[row_index % Color::COUNT];
                row_index += 1;
                for dx in 0..config.block_size as i32 {
                    let cell = Cell::new(origin.x + dx, origin.y + dy);
                    if in_grid(cell) {
                        b.add_rack(cell, color)?;
                    }
                }
            }
        }

        let right = config.width as i32 - 1;
        let start_y = (config.height / 2) as i32 - (config.num_unloading / 2) as i32;
        for i in 0..config.num_unloading as i32 {
            let y = start_y + i;
            b.add_dock(Cell::new(right, y), Role::Unloading)?;
            b.add_standby(Cell::new(right - 1, y), Role::Unloading);
        }

        for x in 0..config.num_loading as i32 {
            b.add_dock(Cell::new(x, 0), Role::Loading)?;
            b.add_standby(Cell::new(x, 1), Role::Loading);
        }

        b.build()
    }
}
