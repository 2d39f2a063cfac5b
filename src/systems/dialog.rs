//! Modal dialogs: saving, clearing and loading official plots.

use bevy_ecs::event::{EventReader, EventWriter};
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Res, ResMut};
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::events::{DialogInput, DialogRow, EditorCommand, EditorEvent};
use crate::plot::file::validate_plot_name;
use crate::plot::official::OfficialPlots;
use crate::plot::MapArea;
use crate::storage;
use crate::systems::command::open_plot;
use crate::systems::components::{Document, RenderDirty, Stroke};
use crate::systems::ui::UiLayout;
use crate::systems::viewport::Viewport;

/// Shown when an official plot is confirmed without a region or plot to load.
pub const MISSING_SELECTION: &str = "Please select a region and a plot";

/// Longest plot name the save dialog accepts.
pub const MAX_NAME_LENGTH: usize = 48;

/// The open dialog, if any.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub enum DialogState {
    #[default]
    Closed,
    Save {
        name: String,
        area: MapArea,
    },
    ClearConfirm,
    /// Indices into the official plots index.
    LoadOfficial {
        region: usize,
        plot: usize,
    },
    /// A message to acknowledge. `previous` is restored once it is dismissed.
    Notice {
        message: String,
        previous: Option<Box<DialogState>>,
    },
}

/// What a dialog asks the editor to do once it closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    None,
    Save { name: String, area: MapArea },
    Clear,
    LoadOfficial { region: String, plot: String },
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    pub fn notice(message: impl Into<String>) -> Self {
        DialogState::Notice {
            message: message.into(),
            previous: None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DialogState::Closed => "",
            DialogState::Save { .. } => "Save Plot",
            DialogState::ClearConfirm => "Clear All",
            DialogState::LoadOfficial { .. } => "Load Official Plot",
            DialogState::Notice { .. } => "Notice",
        }
    }

    /// Labels of the confirm and cancel buttons. Notices only have a confirm button.
    pub fn button_labels(&self) -> (&'static str, Option<&'static str>) {
        match self {
            DialogState::Save { .. } => ("Save", Some("Cancel")),
            DialogState::ClearConfirm => ("Yes, Clear All", Some("Cancel")),
            DialogState::LoadOfficial { .. } => ("Load", Some("Cancel")),
            DialogState::Notice { .. } | DialogState::Closed => ("OK", None),
        }
    }

    /// The rows that can be stepped through with the arrow buttons.
    pub fn cycle_rows(&self) -> &'static [DialogRow] {
        match self {
            DialogState::Save { .. } => &[DialogRow::Second],
            DialogState::LoadOfficial { .. } => &[DialogRow::First, DialogRow::Second],
            _ => &[],
        }
    }

    /// The selected region and plot names of the official plots dialog.
    pub fn official_selection<'a>(&self, official: &'a OfficialPlots) -> Option<(&'a str, Option<&'a str>)> {
        let DialogState::LoadOfficial { region, plot } = self else {
            return None;
        };
        official
            .region(*region)
            .map(|r| (r.name.as_str(), r.plots.get(*plot).map(String::as_str)))
    }

    /// Applies one input to the dialog and returns the action to perform, if any.
    ///
    /// Confirming an invalid state replaces the dialog with a notice that returns to it.
    pub fn handle(&mut self, input: DialogInput, official: &OfficialPlots) -> DialogOutcome {
        match self {
            DialogState::Closed => DialogOutcome::None,
            DialogState::Save { name, area } => match input {
                DialogInput::Text(text) => {
                    for c in text.chars().filter(|c| !c.is_control()) {
                        if name.chars().count() >= MAX_NAME_LENGTH {
                            break;
                        }
                        name.push(c);
                    }
                    DialogOutcome::None
                }
                DialogInput::Backspace => {
                    name.pop();
                    DialogOutcome::None
                }
                DialogInput::Cycle {
                    row: DialogRow::Second,
                    forward,
                } => {
                    *area = if forward { area.next() } else { area.previous() };
                    DialogOutcome::None
                }
                DialogInput::Cycle { .. } => DialogOutcome::None,
                DialogInput::Confirm => match validate_plot_name(name) {
                    Ok(()) => {
                        let outcome = DialogOutcome::Save {
                            name: name.clone(),
                            area: *area,
                        };
                        *self = DialogState::Closed;
                        outcome
                    }
                    Err(e) => {
                        self.raise_notice(e.to_string());
                        DialogOutcome::None
                    }
                },
                DialogInput::Cancel => {
                    *self = DialogState::Closed;
                    DialogOutcome::None
                }
            },
            DialogState::ClearConfirm => match input {
                DialogInput::Confirm => {
                    *self = DialogState::Closed;
                    DialogOutcome::Clear
                }
                DialogInput::Cancel => {
                    *self = DialogState::Closed;
                    DialogOutcome::None
                }
                _ => DialogOutcome::None,
            },
            DialogState::LoadOfficial { region, plot } => match input {
                DialogInput::Cycle { row, forward } => {
                    match row {
                        DialogRow::First => {
                            *region = step(*region, official.regions().len(), forward);
                            *plot = 0;
                        }
                        DialogRow::Second => {
                            let count = official.region(*region).map_or(0, |r| r.plots.len());
                            *plot = step(*plot, count, forward);
                        }
                    }
                    DialogOutcome::None
                }
                DialogInput::Confirm => {
                    let selection = official
                        .region(*region)
                        .and_then(|r| r.plots.get(*plot).map(|p| (r.name.clone(), p.clone())));
                    match selection {
                        Some((region, plot)) => {
                            *self = DialogState::Closed;
                            DialogOutcome::LoadOfficial { region, plot }
                        }
                        None => {
                            self.raise_notice(MISSING_SELECTION);
                            DialogOutcome::None
                        }
                    }
                }
                DialogInput::Cancel => {
                    *self = DialogState::Closed;
                    DialogOutcome::None
                }
                _ => DialogOutcome::None,
            },
            DialogState::Notice { previous, .. } => match input {
                DialogInput::Confirm | DialogInput::Cancel => {
                    *self = previous.take().map(|p| *p).unwrap_or_default();
                    DialogOutcome::None
                }
                _ => DialogOutcome::None,
            },
        }
    }

    fn raise_notice(&mut self, message: impl Into<String>) {
        let previous = std::mem::take(self);
        *self = DialogState::Notice {
            message: message.into(),
            previous: Some(Box::new(previous)),
        };
    }
}

/// Steps an index through `0..count`, wrapping at both ends.
fn step(index: usize, count: usize, forward: bool) -> usize {
    if count == 0 {
        return 0;
    }
    if forward {
        (index + 1) % count
    } else {
        (index + count - 1) % count
    }
}

/// Opens dialogs and applies their outcomes to the document.
#[allow(clippy::too_many_arguments)]
pub fn dialog_system(
    mut events: EventReader<EditorEvent>,
    mut dialog: ResMut<DialogState>,
    official: Res<OfficialPlots>,
    config: Res<EditorConfig>,
    ui: Res<UiLayout>,
    mut document: ResMut<Document>,
    mut viewport: ResMut<Viewport>,
    mut stroke: ResMut<Stroke>,
    mut dirty: ResMut<RenderDirty>,
    mut errors: EventWriter<EditorError>,
) {
    for event in events.read() {
        let EditorEvent::Command(command) = event;
        let outcome = match command {
            EditorCommand::OpenSaveDialog if !dialog.is_open() => {
                *dialog = DialogState::Save {
                    name: document.name.clone(),
                    area: document.map_area,
                };
                DialogOutcome::None
            }
            EditorCommand::OpenClearDialog if !dialog.is_open() => {
                *dialog = DialogState::ClearConfirm;
                DialogOutcome::None
            }
            EditorCommand::OpenOfficialDialog if !dialog.is_open() => {
                *dialog = DialogState::LoadOfficial { region: 0, plot: 0 };
                DialogOutcome::None
            }
            EditorCommand::Dialog(input) => dialog.handle(input.clone(), &official),
            _ => continue,
        };
        dirty.0 = true;
        debug!(dialog = dialog.title(), "Dialog updated");

        match outcome {
            DialogOutcome::None => {}
            DialogOutcome::Save { name, area } => {
                let plot = document.to_plot(&name, area);
                match storage::export_plot(&plot, &config.save_dir) {
                    Ok(destination) => {
                        info!(name = %plot.name, destination = %destination.display(), "Plot saved");
                        document.name = name;
                        document.map_area = area;
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to save plot");
                        *dialog = DialogState::notice(e.to_string());
                        errors.write(e);
                    }
                }
            }
            DialogOutcome::Clear => {
                document.layout.clear_all();
                *stroke = Stroke::default();
                viewport.fit(ui.canvas_size());
                info!("Cleared all levels");
            }
            DialogOutcome::LoadOfficial { region, plot } => match storage::load_official_plot(&region, &plot) {
                Ok(loaded) => {
                    info!(region = %region, plot = %plot, "Loaded official plot");
                    open_plot(loaded, &mut document, &mut viewport, &mut stroke, ui.canvas_size());
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load official plot");
                    *dialog = DialogState::notice(e.to_string());
                    errors.write(e);
                }
            },
        }
    }
}
