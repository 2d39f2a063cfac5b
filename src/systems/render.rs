//! Draws the editor: toolbar, level selector, grid canvas and the open dialog.

use bevy_ecs::event::{EventReader, EventWriter};
use bevy_ecs::system::{NonSendMut, Res, ResMut};
use glam::{UVec2, Vec2};
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;
use smallvec::SmallVec;
use tracing::error;

use crate::constants::ui::{DASH_PATTERN, GLYPH_HEIGHT, GLYPH_WIDTH, PADDING};
use crate::constants::{colors, LEVEL_BAR_HEIGHT, TITLE, TOOLBAR_HEIGHT};
use crate::error::EditorError;
use crate::events::DialogRow;
use crate::plot::official::OfficialPlots;
use crate::plot::terrain::BorderStyle;
use crate::plot::{Terrain, PALETTE};
use crate::systems::components::{Document, RenderDirty, Tools};
use crate::systems::dialog::DialogState;
use crate::systems::ui::{RowLayout, UiLayout};
use crate::systems::viewport::Viewport;

type DrawResult = Result<(), String>;

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::RGB(r, g, b)
}

/// Black or white, whichever reads better on the given background.
pub fn contrasting_text((r, g, b): (u8, u8, u8)) -> Color {
    let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luma > 150.0 {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

/// Splits a line into dash segments, starting with a dash at `start`.
pub fn dash_segments(start: Vec2, end: Vec2, dash: f32, gap: f32) -> SmallVec<[(Vec2, Vec2); 8]> {
    let mut segments = SmallVec::new();
    let length = start.distance(end);
    if length <= f32::EPSILON || dash <= 0.0 {
        return segments;
    }

    let direction = (end - start) / length;
    let mut travelled = 0.0;
    while travelled < length {
        let stop = (travelled + dash).min(length);
        segments.push((start + direction * travelled, start + direction * stop));
        travelled = stop + gap.max(0.0);
    }
    segments
}

/// Greedy word wrap to at most `max_chars` characters per line. Words longer than a line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if line.is_empty() { word.chars().count() } else { line.chars().count() + 1 + word.chars().count() };
        if needed > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Width of a string in the built-in font.
fn text_width(text: &str) -> i32 {
    text.chars().count() as i32 * GLYPH_WIDTH
}

fn draw_text(canvas: &mut Canvas<Window>, text: &str, position: Point, color: Color) -> DrawResult {
    canvas.string(position.x() as i16, position.y() as i16, text, color)
}

fn draw_text_centered(canvas: &mut Canvas<Window>, text: &str, center: Point, color: Color) -> DrawResult {
    let position = Point::new(center.x() - text_width(text) / 2, center.y() - GLYPH_HEIGHT / 2);
    draw_text(canvas, text, position, color)
}

/// Draws a terrain symbol centered in a square of `size` pixels.
///
/// The built-in font only covers ASCII, so the box and erase glyphs are drawn as shapes.
fn draw_symbol(canvas: &mut Canvas<Window>, symbol: &str, center: Point, size: i32, color: Color) -> DrawResult {
    match symbol {
        "" => Ok(()),
        "□" => {
            let side = (size / 2).max(3) as u32;
            canvas.set_draw_color(color);
            canvas.draw_rect(Rect::from_center(center, side, side))
        }
        "⌫" => {
            let half = (size / 4).max(3);
            let (x, y) = (center.x(), center.y());
            canvas.set_draw_color(color);
            canvas.draw_lines(
                &[
                    Point::new(x - half * 2, y),
                    Point::new(x - half, y - half),
                    Point::new(x + half * 2, y - half),
                    Point::new(x + half * 2, y + half),
                    Point::new(x - half, y + half),
                    Point::new(x - half * 2, y),
                ][..],
            )?;
            canvas.draw_line(Point::new(x - 2, y - 3), Point::new(x + 4, y + 3))?;
            canvas.draw_line(Point::new(x - 2, y + 3), Point::new(x + 4, y - 3))
        }
        text => draw_text_centered(canvas, text, center, color),
    }
}

fn draw_button(canvas: &mut Canvas<Window>, rect: Rect, fill: (u8, u8, u8), label: &str, active: bool) -> DrawResult {
    canvas.set_draw_color(rgb(fill));
    canvas.fill_rect(rect)?;
    if active {
        canvas.set_draw_color(rgb(colors::ACTIVE_OUTLINE));
        canvas.draw_rect(rect)?;
        canvas.draw_rect(Rect::new(rect.x() + 1, rect.y() + 1, rect.width().saturating_sub(2), rect.height().saturating_sub(2)))?;
    }
    draw_text_centered(canvas, label, rect.center(), contrasting_text(fill))
}

fn draw_toolbar(canvas: &mut Canvas<Window>, ui: &UiLayout, tools: &Tools) -> DrawResult {
    let window = ui.window();
    canvas.set_draw_color(rgb(colors::TOOLBAR));
    canvas.fill_rect(Rect::new(0, 0, window.x, TOOLBAR_HEIGHT))?;
    draw_text(canvas, TITLE, Point::new(PADDING, PADDING + 16), Color::WHITE)?;

    for (index, brush) in PALETTE.iter().enumerate() {
        let Some(rect) = ui.palette_rect(index) else {
            continue;
        };
        let label = brush.name();
        let label_center = Point::new(rect.center().x(), rect.y() + rect.height() as i32 / 3);
        canvas.set_draw_color(rgb(brush.rgb()));
        canvas.fill_rect(rect)?;
        draw_text_centered(canvas, label, label_center, contrasting_text(brush.rgb()))?;

        let symbol_center = Point::new(rect.center().x(), rect.y() + rect.height() as i32 * 2 / 3 + 2);
        draw_symbol(canvas, brush.symbol(), symbol_center, 16, Color::BLACK)?;

        let active = *brush == tools.brush;
        canvas.set_draw_color(if active { rgb(colors::ACTIVE_OUTLINE) } else { Color::BLACK });
        canvas.draw_rect(rect)?;
        if active {
            canvas.draw_rect(Rect::new(rect.x() + 1, rect.y() + 1, rect.width() - 2, rect.height() - 2))?;
        }
    }

    draw_button(canvas, ui.save_rect(), colors::SAVE_BUTTON, "Save Plot", false)?;
    draw_button(canvas, ui.clear_rect(), colors::CLEAR_BUTTON, "Clear All", false)?;
    draw_button(canvas, ui.load_official_rect(), colors::LOAD_BUTTON, "Official Plots", false)
}

fn draw_level_bar(canvas: &mut Canvas<Window>, ui: &UiLayout, tools: &Tools) -> DrawResult {
    let window = ui.window();
    canvas.set_draw_color(rgb(colors::LEVEL_BAR));
    canvas.fill_rect(Rect::new(0, TOOLBAR_HEIGHT as i32, window.x, LEVEL_BAR_HEIGHT))?;
    for (level, rect) in ui.level_rects() {
        let active = level == tools.level;
        draw_button(canvas, rect, if active { colors::LOAD_BUTTON } else { colors::BUTTON }, level.name(), active)?;
    }
    Ok(())
}

/// Draws one painted cell. `rect` is the cell's area on screen.
/// Dash segments running one pixel inside a cell's stroke, so both stay visible.
///
/// Cells too small to hold an inner outline get none.
pub fn dashed_outline(rect: Rect, scale: f32) -> Vec<(Vec2, Vec2)> {
    if rect.width() <= 4 || rect.height() <= 4 {
        return Vec::new();
    }

    let (x0, y0) = (rect.x() as f32 + 1.0, rect.y() as f32 + 1.0);
    let (x1, y1) = (rect.right() as f32 - 2.0, rect.bottom() as f32 - 2.0);
    let corners = [Vec2::new(x0, y0), Vec2::new(x1, y0), Vec2::new(x1, y1), Vec2::new(x0, y1)];
    let dash = DASH_PATTERN * scale.max(0.5);

    corners
        .iter()
        .enumerate()
        .flat_map(|(i, start)| dash_segments(*start, corners[(i + 1) % corners.len()], dash.x, dash.y))
        .collect()
}

fn draw_cell(canvas: &mut Canvas<Window>, rect: Rect, terrain: Terrain, scale: f32) -> DrawResult {
    canvas.set_draw_color(rgb(terrain.rgb()));
    canvas.fill_rect(rect)?;

    canvas.set_draw_color(Color::BLACK);
    canvas.draw_rect(rect)?;

    if terrain.border_style() == Some(BorderStyle::Dashed) {
        for (a, b) in dashed_outline(rect, scale) {
            canvas.draw_line(
                Point::new(a.x.round() as i32, a.y.round() as i32),
                Point::new(b.x.round() as i32, b.y.round() as i32),
            )?;
        }
    }

    // Symbols are unreadable on tiny cells
    if rect.width() >= GLYPH_WIDTH as u32 + 2 {
        draw_symbol(canvas, terrain.symbol(), rect.center(), rect.width() as i32, Color::BLACK)?;
    }
    Ok(())
}

fn draw_grid(canvas: &mut Canvas<Window>, ui: &UiLayout, viewport: &Viewport, document: &Document, tools: &Tools) -> DrawResult {
    let area = ui.canvas_rect();
    if ui.canvas_size().y == 0 {
        return Ok(());
    }

    canvas.set_clip_rect(area);
    canvas.set_draw_color(Color::WHITE);
    canvas.fill_rect(area)?;

    let origin = Vec2::new(area.x() as f32, area.y() as f32);
    let grid = document.layout.grid(tools.level);
    let to_screen = |col: u32, row: u32| (viewport.cell_to_screen(UVec2::new(col, row)) + origin).floor();

    for row in 0..viewport.grid.y {
        for col in 0..viewport.grid.x {
            let top_left = to_screen(col, row);
            let bottom_right = to_screen(col + 1, row + 1);
            // Neighbouring cells share their border pixels
            let size = (bottom_right - top_left).max(Vec2::ONE) + Vec2::ONE;
            let rect = Rect::new(top_left.x as i32, top_left.y as i32, size.x as u32, size.y as u32);
            if !rect.has_intersection(area) {
                continue;
            }

            match grid.get(UVec2::new(col, row)) {
                Some(terrain) => draw_cell(canvas, rect, terrain, viewport.scale)?,
                None => {
                    canvas.set_draw_color(rgb(colors::GRID_LINE));
                    canvas.draw_rect(rect)?;
                }
            }
        }
    }

    let status = format!(
        "{} | {} | {:.0}%",
        tools.level.name(),
        tools.brush.name(),
        viewport.scale * 100.0
    );
    draw_text(
        canvas,
        &status,
        Point::new(area.x() + PADDING, area.bottom() - PADDING - GLYPH_HEIGHT),
        Color::RGB(0x40, 0x40, 0x40),
    )?;

    canvas.set_clip_rect(None);
    Ok(())
}

fn draw_row(canvas: &mut Canvas<Window>, layout: &RowLayout, value: &str, cycles: bool) -> DrawResult {
    canvas.set_draw_color(Color::RGB(0xF7, 0xF7, 0xF7));
    canvas.fill_rect(layout.field)?;
    canvas.set_draw_color(Color::RGB(0x99, 0x99, 0x99));
    canvas.draw_rect(layout.field)?;
    draw_text_centered(canvas, value, layout.field.center(), Color::BLACK)?;

    if cycles {
        draw_button(canvas, layout.previous, colors::BUTTON, "<", false)?;
        draw_button(canvas, layout.next, colors::BUTTON, ">", false)?;
    }
    Ok(())
}

fn draw_dialog(canvas: &mut Canvas<Window>, ui: &UiLayout, dialog: &DialogState, official: &OfficialPlots) -> DrawResult {
    let window = ui.window();
    let layout = ui.dialog();

    canvas.set_blend_mode(BlendMode::Blend);
    canvas.set_draw_color(Color::RGBA(0, 0, 0, colors::OVERLAY_ALPHA));
    canvas.fill_rect(Rect::new(0, 0, window.x, window.y))?;
    canvas.set_blend_mode(BlendMode::None);

    canvas.set_draw_color(rgb(colors::DIALOG));
    canvas.fill_rect(layout.panel)?;
    canvas.set_draw_color(Color::BLACK);
    canvas.draw_rect(layout.panel)?;

    let panel = layout.panel;
    draw_text_centered(canvas, dialog.title(), Point::new(panel.center().x(), panel.y() + 25), Color::BLACK)?;

    let cycles = |row: DialogRow| dialog.cycle_rows().contains(&row);
    let max_chars = ((panel.width() as i32 - 2 * 20) / GLYPH_WIDTH) as usize;
    match dialog {
        DialogState::Closed => return Ok(()),
        DialogState::Save { name, area } => {
            draw_row(canvas, &layout.first_row, &format!("{name}_"), cycles(DialogRow::First))?;
            draw_row(canvas, &layout.second_row, area.name(), cycles(DialogRow::Second))?;
        }
        DialogState::ClearConfirm => {
            let message = "Are you sure you want to clear all levels? This cannot be undone.";
            for (i, line) in wrap_text(message, max_chars).iter().enumerate() {
                let center = Point::new(panel.center().x(), panel.y() + 70 + i as i32 * (GLYPH_HEIGHT + 6));
                draw_text_centered(canvas, line, center, Color::BLACK)?;
            }
        }
        DialogState::LoadOfficial { .. } => {
            let (region, plot) = dialog.official_selection(official).unwrap_or(("No regions", None));
            draw_row(canvas, &layout.first_row, region, cycles(DialogRow::First))?;
            draw_row(canvas, &layout.second_row, plot.unwrap_or("No plots"), cycles(DialogRow::Second))?;
        }
        DialogState::Notice { message, .. } => {
            for (i, line) in wrap_text(message, max_chars).iter().enumerate() {
                let center = Point::new(panel.center().x(), panel.y() + 70 + i as i32 * (GLYPH_HEIGHT + 6));
                draw_text_centered(canvas, line, center, Color::BLACK)?;
            }
        }
    }

    let (confirm, cancel) = dialog.button_labels();
    draw_button(canvas, layout.confirm, colors::SAVE_BUTTON, confirm, false)?;
    if let Some(cancel) = cancel {
        draw_button(canvas, layout.cancel, colors::BUTTON, cancel, false)?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut canvas: NonSendMut<Canvas<Window>>,
    ui: Res<UiLayout>,
    viewport: Res<Viewport>,
    document: Res<Document>,
    tools: Res<Tools>,
    dialog: Res<DialogState>,
    official: Res<OfficialPlots>,
    dirty: Res<RenderDirty>,
    mut errors: EventWriter<EditorError>,
) {
    if !dirty.0 {
        return;
    }

    canvas.set_draw_color(rgb(colors::BACKGROUND));
    canvas.clear();

    let result = draw_grid(&mut canvas, &ui, &viewport, &document, &tools)
        .and_then(|_| draw_toolbar(&mut canvas, &ui, &tools))
        .and_then(|_| draw_level_bar(&mut canvas, &ui, &tools))
        .and_then(|_| {
            if dialog.is_open() {
                draw_dialog(&mut canvas, &ui, &dialog, &official)
            } else {
                Ok(())
            }
        });

    if let Err(e) = result {
        canvas.set_clip_rect(None);
        errors.write(EditorError::Sdl(e));
    }
}

pub fn present_system(mut canvas: NonSendMut<Canvas<Window>>, mut dirty: ResMut<RenderDirty>) {
    if dirty.0 {
        canvas.present();
        dirty.0 = false;
    }
}

/// Reports errors raised by other systems.
pub fn error_log_system(mut errors: EventReader<EditorError>) {
    for e in errors.read() {
        error!(error = %e, "Editor error");
    }
}

