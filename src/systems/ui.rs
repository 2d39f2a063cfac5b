//! Screen layout of the toolbar, level selector, canvas and dialogs.
//!
//! Everything here is derived from the window size alone, so hit testing and rendering always agree.

use bevy_ecs::resource::Resource;
use glam::{UVec2, Vec2};
use sdl2::rect::{Point, Rect};
use smallvec::SmallVec;
use strum::{EnumCount, IntoEnumIterator};

use crate::constants::ui::{
    BUTTON_GAP, DIALOG_BUTTON_SIZE, DIALOG_SIZE, LEVEL_BUTTON_SIZE, PADDING, PALETTE_BUTTON_SIZE, PALETTE_ROW_LENGTH,
    TITLE_WIDTH, UTILITY_BUTTON_SIZE,
};
use crate::constants::{CANVAS_TOP, TOOLBAR_HEIGHT};
use crate::events::{DialogInput, DialogRow};
use crate::plot::{Level, PALETTE};
use crate::systems::dialog::DialogState;

/// Something on screen that reacts to a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTarget {
    /// A palette entry, by index into `PALETTE`.
    Palette(usize),
    Level(Level),
    Save,
    Clear,
    LoadOfficial,
    Canvas,
}

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct UiLayout {
    window: UVec2,
    palette: SmallVec<[Rect; 9]>,
    levels: SmallVec<[(Level, Rect); Level::COUNT]>,
    save: Rect,
    clear: Rect,
    load_official: Rect,
    canvas: Rect,
    dialog: DialogLayout,
}

impl UiLayout {
    pub fn new(window: UVec2) -> Self {
        let palette_x = PADDING + TITLE_WIDTH as i32 + PADDING;
        let palette = (0..PALETTE.len())
            .map(|i| {
                let column = (i % PALETTE_ROW_LENGTH) as i32;
                let row = (i / PALETTE_ROW_LENGTH) as i32;
                Rect::new(
                    palette_x + column * (PALETTE_BUTTON_SIZE.x as i32 + BUTTON_GAP),
                    PADDING + row * (PALETTE_BUTTON_SIZE.y as i32 + BUTTON_GAP),
                    PALETTE_BUTTON_SIZE.x,
                    PALETTE_BUTTON_SIZE.y,
                )
            })
            .collect();

        // Utility buttons are stacked against the right edge.
        let utility_x = window.x as i32 - PADDING - UTILITY_BUTTON_SIZE.x as i32;
        let utility = |index: i32| {
            Rect::new(
                utility_x,
                PADDING + index * (UTILITY_BUTTON_SIZE.y as i32 + BUTTON_GAP),
                UTILITY_BUTTON_SIZE.x,
                UTILITY_BUTTON_SIZE.y,
            )
        };

        let level_y = TOOLBAR_HEIGHT as i32 + PADDING;
        let levels = Level::iter()
            .map(|level| {
                let x = PADDING + level.index() as i32 * (LEVEL_BUTTON_SIZE.x as i32 + BUTTON_GAP);
                (level, Rect::new(x, level_y, LEVEL_BUTTON_SIZE.x, LEVEL_BUTTON_SIZE.y))
            })
            .collect();

        UiLayout {
            window,
            palette,
            levels,
            save: utility(0),
            clear: utility(1),
            load_official: utility(2),
            canvas: Rect::new(0, CANVAS_TOP as i32, window.x, window.y.saturating_sub(CANVAS_TOP)),
            dialog: DialogLayout::new(window),
        }
    }

    pub fn window(&self) -> UVec2 {
        self.window
    }

    pub fn palette_rect(&self, index: usize) -> Option<Rect> {
        self.palette.get(index).copied()
    }

    pub fn level_rects(&self) -> impl Iterator<Item = (Level, Rect)> + '_ {
        self.levels.iter().copied()
    }

    pub fn save_rect(&self) -> Rect {
        self.save
    }

    pub fn clear_rect(&self) -> Rect {
        self.clear
    }

    pub fn load_official_rect(&self) -> Rect {
        self.load_official
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas
    }

    pub fn dialog(&self) -> &DialogLayout {
        &self.dialog
    }

    /// The drawable canvas area in pixels; zero when the window is too short to show it.
    pub fn canvas_size(&self) -> UVec2 {
        UVec2::new(self.window.x, self.window.y.saturating_sub(CANVAS_TOP))
    }

    /// Converts a window position into a canvas-relative position.
    pub fn to_canvas(&self, point: Vec2) -> Vec2 {
        point - Vec2::new(self.canvas.x() as f32, self.canvas.y() as f32)
    }

    pub fn in_canvas(&self, point: Vec2) -> bool {
        self.canvas_size().y > 0 && self.canvas.contains_point(to_point(point))
    }

    /// The clickable element under a window position.
    pub fn hit(&self, point: Vec2) -> Option<UiTarget> {
        let p = to_point(point);
        if let Some(index) = self.palette.iter().position(|rect| rect.contains_point(p)) {
            return Some(UiTarget::Palette(index));
        }
        if let Some((level, _)) = self.levels.iter().find(|(_, rect)| rect.contains_point(p)) {
            return Some(UiTarget::Level(*level));
        }
        if self.save.contains_point(p) {
            return Some(UiTarget::Save);
        }
        if self.clear.contains_point(p) {
            return Some(UiTarget::Clear);
        }
        if self.load_official.contains_point(p) {
            return Some(UiTarget::LoadOfficial);
        }
        self.in_canvas(point).then_some(UiTarget::Canvas)
    }
}

/// Positions of the parts of the (single, centered) dialog panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLayout {
    pub panel: Rect,
    pub first_row: RowLayout,
    pub second_row: RowLayout,
    pub confirm: Rect,
    pub cancel: Rect,
}

/// A dialog row: a value field flanked by previous/next buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub previous: Rect,
    pub field: Rect,
    pub next: Rect,
}

const ROW_HEIGHT: u32 = 30;
const CYCLE_BUTTON_WIDTH: u32 = 30;

impl RowLayout {
    fn new(panel: Rect, y: i32) -> Self {
        let inset = 20;
        let field_x = panel.x() + inset + CYCLE_BUTTON_WIDTH as i32 + 6;
        let field_width = panel.width() - 2 * (inset as u32 + CYCLE_BUTTON_WIDTH + 6);
        RowLayout {
            previous: Rect::new(panel.x() + inset, y, CYCLE_BUTTON_WIDTH, ROW_HEIGHT),
            field: Rect::new(field_x, y, field_width, ROW_HEIGHT),
            next: Rect::new(
                panel.right() - inset - CYCLE_BUTTON_WIDTH as i32,
                y,
                CYCLE_BUTTON_WIDTH,
                ROW_HEIGHT,
            ),
        }
    }
}

impl DialogLayout {
    pub fn new(window: UVec2) -> Self {
        let x = (window.x as i32 - DIALOG_SIZE.x as i32) / 2;
        let y = (window.y as i32 - DIALOG_SIZE.y as i32) / 2;
        let panel = Rect::new(x.max(0), y.max(0), DIALOG_SIZE.x, DIALOG_SIZE.y);

        let button_y = panel.bottom() - 20 - DIALOG_BUTTON_SIZE.y as i32;
        DialogLayout {
            panel,
            first_row: RowLayout::new(panel, panel.y() + 60),
            second_row: RowLayout::new(panel, panel.y() + 105),
            confirm: Rect::new(panel.x() + 40, button_y, DIALOG_BUTTON_SIZE.x, DIALOG_BUTTON_SIZE.y),
            cancel: Rect::new(
                panel.right() - 40 - DIALOG_BUTTON_SIZE.x as i32,
                button_y,
                DIALOG_BUTTON_SIZE.x,
                DIALOG_BUTTON_SIZE.y,
            ),
        }
    }

    pub fn row(&self, row: DialogRow) -> &RowLayout {
        match row {
            DialogRow::First => &self.first_row,
            DialogRow::Second => &self.second_row,
        }
    }

    /// The dialog input triggered by a click, given which dialog is open.
    pub fn hit(&self, point: Vec2, state: &DialogState) -> Option<DialogInput> {
        let p = to_point(point);
        if self.confirm.contains_point(p) {
            return Some(DialogInput::Confirm);
        }
        let (_, cancel) = state.button_labels();
        if cancel.is_some() && self.cancel.contains_point(p) {
            return Some(DialogInput::Cancel);
        }
        state.cycle_rows().iter().find_map(|&row| {
            let layout = self.row(row);
            if layout.previous.contains_point(p) {
                Some(DialogInput::Cycle { row, forward: false })
            } else if layout.next.contains_point(p) {
                Some(DialogInput::Cycle { row, forward: true })
            } else {
                None
            }
        })
    }
}

fn to_point(point: Vec2) -> Point {
    Point::new(point.x.floor() as i32, point.y.floor() as i32)
}
