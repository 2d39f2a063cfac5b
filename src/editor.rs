//! The editor's ECS world and frame schedule.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::world::World;
use glam::UVec2;
use sdl2::event::EventType;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::EventPump;
use tracing::{debug, info};

use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::events::EditorEvent;
use crate::plot::official::OfficialPlots;
use crate::plot::Plot;
use crate::storage;
use crate::systems::{
    self, command_system, dialog_system, error_log_system, paint_system, present_system, render_system, Bindings,
    DialogState, Document, GlobalState, InputState, RenderDirty, Stroke, Tools, UiLayout, Viewport,
};

/// Systems that turn input into state changes.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum UpdateSet {
    Input,
    Apply,
}

/// Systems that draw the frame.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum RenderSet {
    Draw,
    Present,
}

/// Editor state manager built on the Bevy ECS architecture.
///
/// The `World` holds the document, tools, view and UI state as resources; the `Schedule` runs input handling,
/// command application and rendering once per frame. SDL2 resources are stored as `NonSend`.
pub struct Editor {
    pub world: World,
    pub schedule: Schedule,
}

impl Editor {
    /// Creates the editor for a window, optionally starting from an existing plot.
    pub fn new(canvas: Canvas<Window>, mut event_pump: EventPump, config: EditorConfig, plot: Option<Plot>) -> EditorResult<Editor> {
        info!("Starting editor initialization");

        debug!("Disabling unnecessary SDL events");
        Self::disable_sdl_events(&mut event_pump);

        let (width, height) = canvas.window().size();
        let official = storage::load_official_index();

        let mut world = Self::build_world(config, UVec2::new(width, height), official, plot);
        world.insert_non_send_resource(event_pump);
        world.insert_non_send_resource(canvas);

        let mut schedule = Schedule::default();
        Self::configure_schedule(&mut schedule);

        info!("Editor initialization completed successfully");
        Ok(Editor { world, schedule })
    }

    /// Builds a world holding every resource except the SDL ones.
    pub fn build_world(config: EditorConfig, window: UVec2, official: OfficialPlots, plot: Option<Plot>) -> World {
        let mut world = World::default();
        EventRegistry::register_event::<EditorError>(&mut world);
        EventRegistry::register_event::<EditorEvent>(&mut world);

        let ui = UiLayout::new(window);
        let mut document = Document::new(config.grid_size());
        if let Some(plot) = plot {
            document.replace(plot);
        }
        let viewport = Viewport::fitted(document.layout.size(), ui.canvas_size());

        world.insert_resource(GlobalState::default());
        world.insert_resource(RenderDirty::default());
        world.insert_resource(Bindings::default());
        world.insert_resource(InputState::default());
        world.insert_resource(DialogState::default());
        world.insert_resource(Tools::default());
        world.insert_resource(Stroke::default());
        world.insert_resource(document);
        world.insert_resource(viewport);
        world.insert_resource(ui);
        world.insert_resource(official);
        world.insert_resource(config);
        world
    }

    fn disable_sdl_events(event_pump: &mut EventPump) {
        for event_type in [
            EventType::JoyAxisMotion,
            EventType::JoyBallMotion,
            EventType::JoyHatMotion,
            EventType::JoyButtonDown,
            EventType::JoyButtonUp,
            EventType::JoyDeviceAdded,
            EventType::JoyDeviceRemoved,
            EventType::ControllerAxisMotion,
            EventType::ControllerButtonDown,
            EventType::ControllerButtonUp,
            EventType::ControllerDeviceAdded,
            EventType::ControllerDeviceRemoved,
            EventType::FingerDown,
            EventType::FingerUp,
            EventType::FingerMotion,
        ] {
            event_pump.disable_event(event_type);
        }
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                systems::input_system.in_set(UpdateSet::Input),
                (command_system, paint_system, dialog_system).chain().in_set(UpdateSet::Apply),
                render_system.in_set(RenderSet::Draw),
                (present_system, error_log_system).chain().in_set(RenderSet::Present),
            ))
            .configure_sets((UpdateSet::Input, UpdateSet::Apply, RenderSet::Draw, RenderSet::Present).chain());
    }

    /// Runs one frame.
    ///
    /// # Returns
    ///
    /// `true` if the editor should close.
    pub fn tick(&mut self) -> bool {
        self.schedule.run(&mut self.world);

        // Events live for two frames; everything is read within the frame it is written
        self.world.resource_mut::<Events<EditorEvent>>().update();
        self.world.resource_mut::<Events<EditorError>>().update();

        self.world.get_resource::<GlobalState>().is_some_and(|state| state.exit)
    }

    /// Whether the window has keyboard focus. Unfocused windows sleep instead of spinning.
    pub fn is_focused(&self) -> bool {
        let focus = sdl2::sys::SDL_WindowFlags::SDL_WINDOW_INPUT_FOCUS as u32;
        self.world
            .get_non_send_resource::<Canvas<Window>>()
            .is_none_or(|canvas| canvas.window().window_flags() & focus != 0)
    }
}
