//! Grid geometry
//!
//! The playfield is a fixed `width × height` lattice of cells. Positions are
//! integer pairs; coordinates outside the grid only exist transiently while a
//! move is being resolved.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, CELL_SIZE};

/// A cell coordinate on the grid
pub type Position = IVec2;

/// Grid dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self::from_canvas(CANVAS_WIDTH, CANVAS_HEIGHT, CELL_SIZE)
    }
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "grid must be non-empty");
        Self { width, height }
    }

    /// Derive the grid from a pixel canvas and cell size (800×600 @ 20px → 40×30)
    pub fn from_canvas(canvas_width: i32, canvas_height: i32, cell_size: i32) -> Self {
        Self::new(canvas_width / cell_size, canvas_height / cell_size)
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Toroidal wraparound (works for any distance outside the grid)
    #[inline]
    pub fn wrap(&self, pos: Position) -> Position {
        IVec2::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    /// Center cell (rounded down)
    pub fn center(&self) -> Position {
        IVec2::new(self.width / 2, self.height / 2)
    }
}
