#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use bevy_ecs::world::World;
use glam::{UVec2, Vec2};
use pltr::config::EditorConfig;
use pltr::constants::{CANVAS_TOP, DEFAULT_WINDOW_SIZE};
use pltr::editor::Editor;
use pltr::events::{EditorCommand, EditorEvent};
use pltr::plot::official::OfficialPlots;
use pltr::plot::{Brush, Layout, Level, MapArea, Plot, Terrain};
use pltr::systems::Viewport;

pub const OFFICIAL_INDEX: &str = r#"{
  "Farbane Woods": ["North Plot", "South Plot"],
  "Dunley Farmlands": ["Mill Plot"],
  "Silverlight Hills": []
}"#;

pub fn official_plots() -> OfficialPlots {
    OfficialPlots::from_json(OFFICIAL_INDEX).expect("index should parse")
}

/// A world with every editor resource, sized to the default window.
pub fn create_test_world() -> World {
    create_test_world_with(EditorConfig::default(), None)
}

pub fn create_test_world_with(config: EditorConfig, plot: Option<Plot>) -> World {
    Editor::build_world(config, DEFAULT_WINDOW_SIZE, official_plots(), plot)
}

pub fn send(world: &mut World, command: EditorCommand) {
    world.send_event(EditorEvent::Command(command));
}

/// Window position of a cell's center under the world's current viewport.
pub fn cell_center_in_window(world: &World, cell: UVec2) -> Vec2 {
    let viewport = world.resource::<Viewport>();
    let canvas = viewport.cell_to_screen(cell) + Vec2::splat(viewport.cell_extent() / 2.0);
    canvas + Vec2::new(0.0, CANVAS_TOP as f32)
}

/// Canvas position of a cell's center under the world's current viewport.
pub fn cell_center(world: &World, cell: UVec2) -> Vec2 {
    let viewport = world.resource::<Viewport>();
    viewport.cell_to_screen(cell) + Vec2::splat(viewport.cell_extent() / 2.0)
}

/// A small plot with a few cells painted on two levels.
pub fn sample_plot(name: &str) -> Plot {
    let mut layout = Layout::new(4, 3);
    layout.paint(Level::Ground, UVec2::new(0, 0), Brush::Paint(Terrain::Road));
    layout.paint(Level::Ground, UVec2::new(3, 2), Brush::Paint(Terrain::Water));
    layout.paint(Level::Two, UVec2::new(1, 1), Brush::Paint(Terrain::Bridge));
    Plot::new(name, MapArea::DunleyFarmlands, layout)
}

/// A fresh, empty directory under the system temp dir.
pub fn scratch_dir(label: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let dir = std::env::temp_dir().join(format!(
        "pltr-test-{}-{label}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("scratch dir should be creatable");
    dir
}
