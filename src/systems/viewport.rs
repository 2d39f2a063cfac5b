//! Mapping between canvas pixels and grid cells.
//!
//! The grid is drawn in "grid pixels" (`CELL_SIZE` per cell), then scaled and translated onto the canvas:
//! `canvas = grid * scale + offset`. All positions handled here are relative to the canvas area's top-left
//! corner, not the window's.

use bevy_ecs::resource::Resource;
use glam::{UVec2, Vec2};
use tracing::trace;

use crate::constants::{CELL_SIZE, MAX_SCALE, MIN_SCALE, ZOOM_STEP};

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Uniform scale applied to grid pixels.
    pub scale: f32,
    /// Canvas position of the grid's top-left corner.
    pub offset: Vec2,
    /// Grid size in cells.
    pub grid: UVec2,
}

impl Viewport {
    pub fn new(grid: UVec2) -> Self {
        Viewport {
            scale: 1.0,
            offset: Vec2::ZERO,
            grid,
        }
    }

    /// The unscaled size of the grid, in grid pixels.
    pub fn grid_pixels(&self) -> Vec2 {
        self.grid.as_vec2() * CELL_SIZE
    }

    /// The size of one cell on the canvas.
    pub fn cell_extent(&self) -> f32 {
        CELL_SIZE * self.scale
    }

    /// Scales the grid to the largest size that fits the area and centers it.
    ///
    /// An empty area (minimized window) or empty grid leaves the viewport untouched.
    pub fn fit(&mut self, area: UVec2) {
        let grid_pixels = self.grid_pixels();
        if area.x == 0 || area.y == 0 || grid_pixels.x <= 0.0 || grid_pixels.y <= 0.0 {
            return;
        }

        let area = area.as_vec2();
        let scale = (area.x / grid_pixels.x).min(area.y / grid_pixels.y);
        self.scale = scale;
        self.offset = (area - grid_pixels * self.scale) / 2.0;
        trace!(scale = self.scale, offset = ?self.offset, "Viewport fitted");
    }

    /// Fits a viewport for a new grid size.
    pub fn fitted(grid: UVec2, area: UVec2) -> Self {
        let mut viewport = Viewport::new(grid);
        viewport.fit(area);
        viewport
    }

    /// Converts a canvas position into fractional cell coordinates, without bounds checks.
    pub fn screen_to_grid(&self, point: Vec2) -> Vec2 {
        (point - self.offset) / self.cell_extent()
    }

    /// The cell under a canvas position, if the position lies on the grid.
    pub fn screen_to_cell(&self, point: Vec2) -> Option<UVec2> {
        let cell = self.screen_to_grid(point).floor();
        let in_bounds =
            cell.x >= 0.0 && cell.y >= 0.0 && cell.x < self.grid.x as f32 && cell.y < self.grid.y as f32;
        in_bounds.then(|| cell.as_uvec2())
    }

    /// The canvas position of a cell's top-left corner.
    pub fn cell_to_screen(&self, cell: UVec2) -> Vec2 {
        cell.as_vec2() * self.cell_extent() + self.offset
    }

    /// Converts a position in grid pixels to canvas pixels.
    pub fn grid_to_screen(&self, grid_point: Vec2) -> Vec2 {
        grid_point * self.scale + self.offset
    }

    /// Zooms by one notch around a canvas position, keeping the grid point under it stationary.
    pub fn zoom_at(&mut self, point: Vec2, zoom_in: bool) {
        let old_scale = self.scale;
        let anchor = point / old_scale - self.offset / old_scale;
        let new_scale = if zoom_in { old_scale * ZOOM_STEP } else { old_scale / ZOOM_STEP };
        // A fitted scale may lie outside the zoom bounds; never jump past it
        let new_scale = new_scale.clamp(MIN_SCALE.min(old_scale), MAX_SCALE.max(old_scale));

        self.scale = new_scale;
        self.offset = point - anchor * new_scale;
        trace!(scale = self.scale, offset = ?self.offset, "Viewport zoomed");
    }

    /// Translates the grid on the canvas.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(UVec2::ZERO)
    }
}
