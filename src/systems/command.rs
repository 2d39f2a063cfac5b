//! Applies editor commands to the document, tools and view.

use bevy_ecs::event::{EventReader, EventWriter};
use bevy_ecs::system::{Res, ResMut};
use glam::UVec2;
use tracing::{debug, info, trace, warn};

use crate::error::EditorError;
use crate::events::{EditorCommand, EditorEvent};
use crate::plot::grid::cells_between;
use crate::plot::{Level, Plot};
use crate::storage;
use crate::systems::components::{Document, GlobalState, RenderDirty, Stroke, Tools};
use crate::systems::dialog::DialogState;
use crate::systems::ui::UiLayout;
use crate::systems::viewport::Viewport;

/// Replaces the edited document with a loaded plot and fits the view to its grid.
pub fn open_plot(plot: Plot, document: &mut Document, viewport: &mut Viewport, stroke: &mut Stroke, canvas: UVec2) {
    *viewport = Viewport::fitted(plot.layout.size(), canvas);
    *stroke = Stroke::default();
    document.replace(plot);
}

/// Handles tool selection, view changes, file opening and exit requests.
#[allow(clippy::too_many_arguments)]
pub fn command_system(
    mut events: EventReader<EditorEvent>,
    mut state: ResMut<GlobalState>,
    mut tools: ResMut<Tools>,
    mut viewport: ResMut<Viewport>,
    mut ui: ResMut<UiLayout>,
    mut document: ResMut<Document>,
    mut dialog: ResMut<DialogState>,
    mut stroke: ResMut<Stroke>,
    mut dirty: ResMut<RenderDirty>,
    mut errors: EventWriter<EditorError>,
) {
    for event in events.read() {
        let EditorEvent::Command(command) = event;
        match command {
            EditorCommand::Exit => {
                info!("Exit requested. Exiting...");
                state.exit = true;
            }
            EditorCommand::SelectBrush(brush) => {
                debug!(brush = brush.name(), "Brush selected");
                tools.brush = *brush;
                dirty.0 = true;
            }
            EditorCommand::SelectLevel(level) => select_level(*level, &mut tools, &mut viewport, &ui),
            EditorCommand::NextLevel => select_level(tools.level.next(), &mut tools, &mut viewport, &ui),
            EditorCommand::PreviousLevel => select_level(tools.level.previous(), &mut tools, &mut viewport, &ui),
            EditorCommand::PanBy(delta) => viewport.pan_by(*delta),
            EditorCommand::ZoomAt { point, zoom_in } => viewport.zoom_at(*point, *zoom_in),
            EditorCommand::FitView => viewport.fit(ui.canvas_size()),
            EditorCommand::Resize(size) => {
                debug!(width = size.x, height = size.y, "Window resized");
                *ui = UiLayout::new(*size);
                viewport.fit(ui.canvas_size());
            }
            EditorCommand::Redraw => {}
            EditorCommand::OpenFile(path) => match storage::load_plot_file(path) {
                Ok(plot) => {
                    info!(path = %path.display(), name = %plot.name, "Opened plot");
                    open_plot(plot, &mut document, &mut viewport, &mut stroke, ui.canvas_size());
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to open plot");
                    *dialog = DialogState::notice(e.to_string());
                    errors.write(e);
                }
            },
            // Painting and dialogs have their own systems
            EditorCommand::PaintAt(_)
            | EditorCommand::EndStroke
            | EditorCommand::OpenSaveDialog
            | EditorCommand::OpenClearDialog
            | EditorCommand::OpenOfficialDialog
            | EditorCommand::Dialog(_) => continue,
        }
        dirty.0 = true;
    }
}

fn select_level(level: Level, tools: &mut Tools, viewport: &mut Viewport, ui: &UiLayout) {
    debug!(level = level.name(), "Level selected");
    tools.level = level;
    viewport.fit(ui.canvas_size());
}

/// Paints cells under the pointer with the active brush.
///
/// Consecutive positions of one stroke are joined with a line of cells so quick movements leave no gaps.
pub fn paint_system(
    mut events: EventReader<EditorEvent>,
    tools: Res<Tools>,
    viewport: Res<Viewport>,
    mut document: ResMut<Document>,
    mut stroke: ResMut<Stroke>,
    mut dirty: ResMut<RenderDirty>,
) {
    for event in events.read() {
        match event {
            EditorEvent::Command(EditorCommand::PaintAt(point)) => {
                let Some(cell) = viewport.screen_to_cell(*point) else {
                    stroke.last_cell = None;
                    continue;
                };

                let cells = match stroke.last_cell {
                    Some(last) => cells_between(last, cell),
                    None => vec![cell],
                };
                let mut changed = 0;
                for c in cells {
                    if document.layout.paint(tools.level, c, tools.brush) {
                        changed += 1;
                    }
                }
                stroke.last_cell = Some(cell);

                if changed > 0 {
                    trace!(cell = ?cell, changed, level = tools.level.name(), "Painted");
                    dirty.0 = true;
                }
            }
            EditorEvent::Command(EditorCommand::EndStroke) => stroke.last_cell = None,
            _ => {}
        }
    }
}
