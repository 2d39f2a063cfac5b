//! This module contains all the constants used by the editor.

use std::time::Duration;

use glam::{UVec2, Vec2};

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The window title, also drawn at the left of the toolbar.
pub const TITLE: &str = "V Rising Pltr";

/// The size of each grid cell at a viewport scale of 1, in pixels.
pub const CELL_SIZE: f32 = 20.0;
/// The size of a new plot, in cells.
pub const DEFAULT_GRID_SIZE: UVec2 = UVec2::new(30, 30);

/// The default window size, in pixels.
pub const DEFAULT_WINDOW_SIZE: UVec2 = UVec2::new(1280, 900);
/// The smallest window the layout still fits in.
pub const MIN_WINDOW_SIZE: UVec2 = UVec2::new(1120, 480);

/// Height of the toolbar (title, palette and utility buttons).
pub const TOOLBAR_HEIGHT: u32 = 120;
/// Height of the level selector strip below the toolbar.
pub const LEVEL_BAR_HEIGHT: u32 = 55;
/// Vertical space reserved above the canvas.
pub const CANVAS_TOP: u32 = TOOLBAR_HEIGHT + LEVEL_BAR_HEIGHT;

/// Multiplicative zoom change per wheel notch.
pub const ZOOM_STEP: f32 = 1.1;
/// Viewport scale bounds.
pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 20.0;

pub mod ui {
    use super::*;

    pub const PADDING: i32 = 10;
    pub const TITLE_WIDTH: u32 = 150;
    /// Palette buttons are laid out in rows of this many.
    pub const PALETTE_ROW_LENGTH: usize = 5;
    pub const PALETTE_BUTTON_SIZE: UVec2 = UVec2::new(150, 40);
    pub const UTILITY_BUTTON_SIZE: UVec2 = UVec2::new(140, 28);
    pub const LEVEL_BUTTON_SIZE: UVec2 = UVec2::new(110, 35);
    pub const BUTTON_GAP: i32 = 8;

    pub const DIALOG_SIZE: UVec2 = UVec2::new(440, 220);
    pub const DIALOG_BUTTON_SIZE: UVec2 = UVec2::new(150, 34);

    /// Width of one glyph of the built-in SDL_gfx font.
    pub const GLYPH_WIDTH: i32 = 8;
    pub const GLYPH_HEIGHT: i32 = 8;

    /// Dash and gap length of dashed cell borders, in grid pixels.
    pub const DASH_PATTERN: Vec2 = Vec2::new(2.0, 2.0);
}

pub mod colors {
    pub const BACKGROUND: (u8, u8, u8) = (0xF0, 0xF0, 0xF0);
    pub const TOOLBAR: (u8, u8, u8) = (0x2C, 0x2C, 0x2C);
    pub const LEVEL_BAR: (u8, u8, u8) = (0x3A, 0x3A, 0x3A);
    pub const GRID_LINE: (u8, u8, u8) = (0xAA, 0xAA, 0xAA);
    pub const ACTIVE_OUTLINE: (u8, u8, u8) = (0xFF, 0xD7, 0x00);
    pub const BUTTON: (u8, u8, u8) = (0x55, 0x55, 0x55);
    pub const SAVE_BUTTON: (u8, u8, u8) = (0x4C, 0xAF, 0x50);
    pub const CLEAR_BUTTON: (u8, u8, u8) = (0xF4, 0x43, 0x36);
    pub const LOAD_BUTTON: (u8, u8, u8) = (0x21, 0x96, 0xF3);
    pub const DIALOG: (u8, u8, u8) = (0xFF, 0xFF, 0xFF);
    pub const OVERLAY_ALPHA: u8 = 0x80;
}
