use bevy_ecs::event::Events;
use bevy_ecs::system::RunSystemOnce;
use bevy_ecs::world::World;
use figment::providers::Serialized;
use glam::{UVec2, Vec2};
use pltr::config::EditorConfig;
use pltr::constants::CANVAS_TOP;
use pltr::error::EditorError;
use pltr::events::{DialogInput, EditorCommand};
use pltr::plot::{Brush, Level, MapArea, Terrain, PALETTE};
use pltr::storage;
use pltr::systems::dialog::DialogState;
use pltr::systems::{
    command_system, dialog_system, paint_system, Document, GlobalState, RenderDirty, Stroke, Tools, UiLayout, Viewport,
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

use common::{cell_center, create_test_world, create_test_world_with, send};

fn run_paint(world: &mut World) {
    world.run_system_once(paint_system).expect("paint system should run");
}

fn run_commands(world: &mut World) {
    world.run_system_once(command_system).expect("command system should run");
}

fn run_dialogs(world: &mut World) {
    world.run_system_once(dialog_system).expect("dialog system should run");
}

fn painted(world: &World, level: Level) -> Vec<(UVec2, Terrain)> {
    let mut cells: Vec<_> = world.resource::<Document>().layout.grid(level).painted().collect();
    cells.sort_by_key(|(cell, _)| (cell.y, cell.x));
    cells
}

fn error_count(world: &World) -> usize {
    world.resource::<Events<EditorError>>().len()
}

fn config_saving_to(dir: &std::path::Path) -> EditorConfig {
    EditorConfig::from_figment(EditorConfig::figment().merge(Serialized::default("save_dir", dir)))
        .expect("config should be valid")
}

mod world_tests {
    use super::*;

    #[test]
    fn new_world_starts_with_an_empty_fitted_plot() {
        let world = create_test_world();
        let document = world.resource::<Document>();
        let viewport = world.resource::<Viewport>();

        assert_that(&document.layout.size()).is_equal_to(UVec2::new(30, 30));
        assert_that(&document.layout.is_empty()).is_true();
        assert_that(&viewport.grid).is_equal_to(UVec2::new(30, 30));
        assert_that(&(viewport.scale > 0.0)).is_true();
        assert_that(&world.resource::<RenderDirty>().0).is_true();
        assert_that(world.resource::<Tools>()).is_equal_to(Tools::default());
    }

    #[test]
    fn initial_plot_replaces_the_document() {
        let world = create_test_world_with(EditorConfig::default(), Some(common::sample_plot("Keep")));
        let document = world.resource::<Document>();

        assert_that(&document.name).is_equal_to("Keep".to_string());
        assert_that(&document.map_area).is_equal_to(MapArea::DunleyFarmlands);
        assert_that(&world.resource::<Viewport>().grid).is_equal_to(UVec2::new(4, 3));
    }

    #[test]
    fn configured_grid_size_is_used() {
        let config = EditorConfig::from_figment(
            EditorConfig::figment()
                .merge(Serialized::default("grid_width", 12))
                .merge(Serialized::default("grid_height", 8)),
        )
        .unwrap();
        let world = create_test_world_with(config, None);
        assert_that(&world.resource::<Document>().layout.size()).is_equal_to(UVec2::new(12, 8));
    }
}

mod paint_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn paint_fills_the_cell_under_the_point() {
        let mut world = create_test_world();
        world.resource_mut::<RenderDirty>().0 = false;
        let point = cell_center(&world, UVec2::new(2, 3));

        send(&mut world, EditorCommand::PaintAt(point));
        run_paint(&mut world);

        assert_eq!(painted(&world, Level::Ground), vec![(UVec2::new(2, 3), Terrain::Road)]);
        assert_that(&world.resource::<Stroke>().last_cell).is_equal_to(Some(UVec2::new(2, 3)));
        assert_that(&world.resource::<RenderDirty>().0).is_true();
    }

    #[test]
    fn fast_strokes_are_continuous() {
        let mut world = create_test_world();
        let start = cell_center(&world, UVec2::new(0, 5));
        let end = cell_center(&world, UVec2::new(4, 5));

        send(&mut world, EditorCommand::PaintAt(start));
        send(&mut world, EditorCommand::PaintAt(end));
        run_paint(&mut world);

        let cells: Vec<UVec2> = painted(&world, Level::Ground).into_iter().map(|(cell, _)| cell).collect();
        assert_eq!(cells, (0..=4).map(|x| UVec2::new(x, 5)).collect::<Vec<_>>());
    }

    #[test]
    fn ending_a_stroke_breaks_the_line() {
        let mut world = create_test_world();
        let start = cell_center(&world, UVec2::new(0, 5));
        let end = cell_center(&world, UVec2::new(4, 5));

        send(&mut world, EditorCommand::PaintAt(start));
        send(&mut world, EditorCommand::EndStroke);
        send(&mut world, EditorCommand::PaintAt(end));
        run_paint(&mut world);

        let cells: Vec<UVec2> = painted(&world, Level::Ground).into_iter().map(|(cell, _)| cell).collect();
        assert_eq!(cells, vec![UVec2::new(0, 5), UVec2::new(4, 5)]);
    }

    #[test]
    fn points_off_the_grid_paint_nothing() {
        let mut world = create_test_world();
        world.resource_mut::<Stroke>().last_cell = Some(UVec2::new(1, 1));

        send(&mut world, EditorCommand::PaintAt(Vec2::new(-50.0, -50.0)));
        run_paint(&mut world);

        assert_that(&painted(&world, Level::Ground)).is_empty();
        assert_that(&world.resource::<Stroke>().last_cell).is_none();
    }

    #[test]
    fn painting_uses_the_active_level_and_brush() {
        let mut world = create_test_world();
        *world.resource_mut::<Tools>() = Tools {
            level: Level::Five,
            brush: Brush::Paint(Terrain::OverhangPlatform),
        };
        let point = cell_center(&world, UVec2::new(7, 7));

        send(&mut world, EditorCommand::PaintAt(point));
        run_paint(&mut world);

        assert_eq!(painted(&world, Level::Five), vec![(UVec2::new(7, 7), Terrain::OverhangPlatform)]);
        assert_that(&painted(&world, Level::Ground)).is_empty();
    }

    #[test]
    fn eraser_clears_cells() {
        let mut world = create_test_world();
        world
            .resource_mut::<Document>()
            .layout
            .paint(Level::Ground, UVec2::new(3, 3), Brush::Paint(Terrain::Water));
        world.resource_mut::<Tools>().brush = Brush::Erase;
        let point = cell_center(&world, UVec2::new(3, 3));

        send(&mut world, EditorCommand::PaintAt(point));
        run_paint(&mut world);

        assert_that(&world.resource::<Document>().layout.is_empty()).is_true();
    }

    #[test]
    fn repainting_the_same_value_does_not_redraw() {
        let mut world = create_test_world();
        world
            .resource_mut::<Document>()
            .layout
            .paint(Level::Ground, UVec2::new(3, 3), Brush::Paint(Terrain::Road));
        world.resource_mut::<RenderDirty>().0 = false;
        let point = cell_center(&world, UVec2::new(3, 3));

        send(&mut world, EditorCommand::PaintAt(point));
        run_paint(&mut world);

        assert_that(&world.resource::<RenderDirty>().0).is_false();
    }
}

mod command_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn selecting_tools() {
        let mut world = create_test_world();
        send(&mut world, EditorCommand::SelectBrush(PALETTE[8]));
        send(&mut world, EditorCommand::SelectLevel(Level::Three));
        send(&mut world, EditorCommand::NextLevel);
        run_commands(&mut world);

        let tools = *world.resource::<Tools>();
        assert_that(&tools.brush).is_equal_to(Brush::Erase);
        assert_that(&tools.level).is_equal_to(Level::Four);
    }

    #[test]
    fn previous_level_wraps_to_the_top() {
        let mut world = create_test_world();
        send(&mut world, EditorCommand::PreviousLevel);
        run_commands(&mut world);
        assert_that(&world.resource::<Tools>().level).is_equal_to(Level::Six);
    }

    #[test]
    fn changing_level_refits_the_view() {
        let mut world = create_test_world();
        let fitted = *world.resource::<Viewport>();
        world.resource_mut::<Viewport>().pan_by(Vec2::new(100.0, 40.0));

        send(&mut world, EditorCommand::SelectLevel(Level::One));
        run_commands(&mut world);
        assert_that(world.resource::<Viewport>()).is_equal_to(fitted);
    }

    #[test]
    fn pan_zoom_and_fit() {
        let mut world = create_test_world();
        let fitted = *world.resource::<Viewport>();

        send(&mut world, EditorCommand::PanBy(Vec2::new(15.0, -5.0)));
        send(&mut world, EditorCommand::ZoomAt {
            point: Vec2::new(100.0, 100.0),
            zoom_in: true,
        });
        run_commands(&mut world);
        let moved = *world.resource::<Viewport>();
        assert_that(&(moved.scale > fitted.scale)).is_true();

        world.resource_mut::<Events<pltr::events::EditorEvent>>().clear();
        send(&mut world, EditorCommand::FitView);
        run_commands(&mut world);
        assert_that(world.resource::<Viewport>()).is_equal_to(fitted);
    }

    #[test]
    fn resize_rebuilds_the_layout_and_refits() {
        let mut world = create_test_world();
        let size = UVec2::new(1600, 1200);

        send(&mut world, EditorCommand::Resize(size));
        run_commands(&mut world);

        assert_that(&world.resource::<UiLayout>().window()).is_equal_to(size);
        let expected = Viewport::fitted(UVec2::new(30, 30), UVec2::new(1600, 1200 - CANVAS_TOP));
        assert_that(world.resource::<Viewport>()).is_equal_to(expected);
    }

    #[test]
    fn exit_sets_the_global_flag() {
        let mut world = create_test_world();
        assert_that(&world.resource::<GlobalState>().exit).is_false();

        send(&mut world, EditorCommand::Exit);
        run_commands(&mut world);
        assert_that(&world.resource::<GlobalState>().exit).is_true();
    }

    #[test]
    fn opening_a_file_replaces_the_document() {
        let dir = common::scratch_dir("open");
        let plot = common::sample_plot("Dropped Keep");
        let path = storage::export_plot(&plot, &dir).unwrap();

        let mut world = create_test_world();
        world.resource_mut::<Stroke>().last_cell = Some(UVec2::ONE);
        send(&mut world, EditorCommand::OpenFile(path));
        run_commands(&mut world);

        let document = world.resource::<Document>();
        assert_that(&document.name).is_equal_to("Dropped Keep".to_string());
        assert_eq!(document.layout, plot.layout);
        assert_that(&world.resource::<Viewport>().grid).is_equal_to(UVec2::new(4, 3));
        assert_that(&world.resource::<Stroke>().last_cell).is_none();
        assert_that(&error_count(&world)).is_equal_to(0);
    }

    #[test]
    fn opening_a_bad_file_raises_a_notice_and_an_error() {
        let dir = common::scratch_dir("bad");
        let path = dir.join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut world = create_test_world();
        send(&mut world, EditorCommand::OpenFile(path));
        send(&mut world, EditorCommand::OpenFile(dir.join("missing.json")));
        run_commands(&mut world);

        assert!(matches!(*world.resource::<DialogState>(), DialogState::Notice { .. }));
        assert_that(&error_count(&world)).is_equal_to(2);
        assert_that(&world.resource::<Document>().layout.size()).is_equal_to(UVec2::new(30, 30));
    }
}

mod dialog_system_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn save_dialog_is_prefilled_from_the_document() {
        let mut world = create_test_world_with(EditorConfig::default(), Some(common::sample_plot("Keep")));
        send(&mut world, EditorCommand::OpenSaveDialog);
        run_dialogs(&mut world);

        assert_eq!(
            *world.resource::<DialogState>(),
            DialogState::Save {
                name: "Keep".into(),
                area: MapArea::DunleyFarmlands
            }
        );
    }

    #[test]
    fn dialogs_do_not_stack() {
        let mut world = create_test_world();
        send(&mut world, EditorCommand::OpenClearDialog);
        send(&mut world, EditorCommand::OpenOfficialDialog);
        run_dialogs(&mut world);

        assert_eq!(*world.resource::<DialogState>(), DialogState::ClearConfirm);
    }

    #[test]
    fn confirmed_save_writes_the_document() {
        let dir = common::scratch_dir("save");
        let mut world = create_test_world_with(config_saving_to(&dir), None);
        world
            .resource_mut::<Document>()
            .layout
            .paint(Level::One, UVec2::new(4, 4), Brush::Paint(Terrain::Platform));
        *world.resource_mut::<DialogState>() = DialogState::Save {
            name: "Hill  Fort".into(),
            area: MapArea::SilverlightHills,
        };

        send(&mut world, EditorCommand::Dialog(DialogInput::Confirm));
        run_dialogs(&mut world);

        let saved = storage::load_plot_file(&dir.join("Hill_Fort.json")).expect("saved plot should load");
        assert_that(&saved.name).is_equal_to("Hill  Fort".to_string());
        assert_that(&saved.map_area).is_equal_to(MapArea::SilverlightHills);
        assert_that(&saved.layout.grid(Level::One).get(UVec2::new(4, 4))).is_equal_to(Some(Terrain::Platform));

        let document = world.resource::<Document>();
        assert_that(&document.name).is_equal_to("Hill  Fort".to_string());
        assert_that(&document.map_area).is_equal_to(MapArea::SilverlightHills);
        assert_eq!(*world.resource::<DialogState>(), DialogState::Closed);
    }

    #[test]
    fn blank_save_writes_nothing() {
        let dir = common::scratch_dir("blank");
        let mut world = create_test_world_with(config_saving_to(&dir), None);
        *world.resource_mut::<DialogState>() = DialogState::Save {
            name: String::new(),
            area: MapArea::default(),
        };

        send(&mut world, EditorCommand::Dialog(DialogInput::Confirm));
        run_dialogs(&mut world);

        assert!(matches!(*world.resource::<DialogState>(), DialogState::Notice { .. }));
        assert_that(&std::fs::read_dir(&dir).unwrap().count()).is_equal_to(0);
    }

    #[test]
    fn confirmed_clear_empties_every_level() {
        let mut world = create_test_world();
        {
            let mut document = world.resource_mut::<Document>();
            document.layout.paint(Level::Ground, UVec2::ZERO, Brush::Paint(Terrain::Road));
            document.layout.paint(Level::Six, UVec2::ONE, Brush::Paint(Terrain::Bridge));
        }

        send(&mut world, EditorCommand::OpenClearDialog);
        send(&mut world, EditorCommand::Dialog(DialogInput::Confirm));
        run_dialogs(&mut world);

        assert_that(&world.resource::<Document>().layout.is_empty()).is_true();
        assert_eq!(*world.resource::<DialogState>(), DialogState::Closed);
    }

    #[test]
    fn cancelled_clear_keeps_the_plot() {
        let mut world = create_test_world();
        world
            .resource_mut::<Document>()
            .layout
            .paint(Level::Ground, UVec2::ZERO, Brush::Paint(Terrain::Road));

        send(&mut world, EditorCommand::OpenClearDialog);
        send(&mut world, EditorCommand::Dialog(DialogInput::Cancel));
        run_dialogs(&mut world);

        assert_that(&world.resource::<Document>().layout.is_empty()).is_false();
    }

    #[test]
    fn loading_a_shipped_official_plot() {
        let mut world = create_test_world();
        world.insert_resource(storage::load_official_index());

        send(&mut world, EditorCommand::OpenOfficialDialog);
        send(&mut world, EditorCommand::Dialog(DialogInput::Confirm));
        run_dialogs(&mut world);

        let document = world.resource::<Document>();
        assert_that(&document.name).is_equal_to("Bandit Camp Plot".to_string());
        assert_that(&document.map_area).is_equal_to(MapArea::FarbaneWoods);
        assert_that(&document.layout.is_empty()).is_false();
        assert_eq!(*world.resource::<DialogState>(), DialogState::Closed);
    }

    #[test]
    fn missing_official_plot_raises_a_notice_and_an_error() {
        // The test index names plots that are not shipped
        let mut world = create_test_world();

        send(&mut world, EditorCommand::OpenOfficialDialog);
        send(&mut world, EditorCommand::Dialog(DialogInput::Confirm));
        run_dialogs(&mut world);

        assert!(matches!(*world.resource::<DialogState>(), DialogState::Notice { .. }));
        assert_that(&error_count(&world)).is_equal_to(1);
        assert_that(&world.resource::<Document>().layout.is_empty()).is_true();
    }
}
