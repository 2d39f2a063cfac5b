//! Shared resources describing the editor's state.

use bevy_ecs::resource::Resource;
use glam::UVec2;

use crate::plot::{Brush, Layout, Level, MapArea, Plot};

/// A global resource to store the application's exit state.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct GlobalState {
    pub exit: bool,
}

/// Set whenever something visible changed; cleared once the frame is presented.
#[derive(Resource, Debug, Clone, Copy)]
pub struct RenderDirty(pub bool);

impl Default for RenderDirty {
    fn default() -> Self {
        RenderDirty(true)
    }
}

/// The plot being edited.
///
/// The name and area are remembered from the last save or load and pre-fill the save dialog.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub layout: Layout,
    pub name: String,
    pub map_area: MapArea,
}

impl Document {
    pub fn new(size: UVec2) -> Self {
        Document {
            layout: Layout::new(size.x as usize, size.y as usize),
            name: String::new(),
            map_area: MapArea::default(),
        }
    }

    /// Snapshot of the document under a chosen name and area, ready to be written.
    pub fn to_plot(&self, name: &str, map_area: MapArea) -> Plot {
        Plot::new(name, map_area, self.layout.clone())
    }

    /// Replaces the document with a loaded plot.
    pub fn replace(&mut self, plot: Plot) {
        self.layout = plot.layout;
        self.name = plot.name;
        self.map_area = plot.map_area;
    }
}

/// The active level and brush.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tools {
    pub level: Level,
    pub brush: Brush,
}

/// The in-progress paint stroke.
///
/// Remembers the last painted cell so fast pointer movement paints a continuous line instead of scattered cells.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stroke {
    pub last_cell: Option<UVec2>,
}
