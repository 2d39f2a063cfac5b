use std::path::PathBuf;

use bevy_ecs::prelude::*;
use glam::{UVec2, Vec2};

use crate::plot::{Brush, Level};

/// Which row of a dialog a cycling control belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogRow {
    First,
    Second,
}

/// Input routed to the open dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogInput {
    /// Text typed into the dialog's text field.
    Text(String),
    Backspace,
    /// Step a selector row forwards or backwards.
    Cycle { row: DialogRow, forward: bool },
    Confirm,
    Cancel,
}

/// An action requested by the user, independent of how it was triggered.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorCommand {
    Exit,
    SelectBrush(Brush),
    SelectLevel(Level),
    NextLevel,
    PreviousLevel,
    /// Paint the cell under a canvas-relative position with the active brush.
    PaintAt(Vec2),
    EndStroke,
    PanBy(Vec2),
    ZoomAt {
        point: Vec2,
        zoom_in: bool,
    },
    /// Re-center the grid and reset the zoom.
    FitView,
    /// The window was resized to the given size.
    Resize(UVec2),
    /// The window contents were lost and must be drawn again.
    Redraw,
    OpenSaveDialog,
    OpenClearDialog,
    OpenOfficialDialog,
    Dialog(DialogInput),
    /// Load a plot document from disk.
    OpenFile(PathBuf),
}

#[derive(Event, Clone, Debug, PartialEq)]
pub enum EditorEvent {
    Command(EditorCommand),
}

impl From<EditorCommand> for EditorEvent {
    fn from(command: EditorCommand) -> Self {
        EditorEvent::Command(command)
    }
}
