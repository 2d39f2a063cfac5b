//! The Entity-Component-System (ECS) module.
//!
//! This module contains the editor's resources and the systems that run each frame:
//! input, commands, painting, dialogs and rendering.

pub mod command;
pub mod components;
pub mod dialog;
pub mod input;
pub mod render;
pub mod ui;
pub mod viewport;

pub use self::command::{command_system, open_plot, paint_system};
pub use self::components::{Document, GlobalState, RenderDirty, Stroke, Tools};
pub use self::dialog::{dialog_system, DialogOutcome, DialogState};
pub use self::input::{input_system, process_inputs, Bindings, InputState, PointerMode, SimpleInput};
pub use self::render::{error_log_system, present_system, render_system};
pub use self::ui::{UiLayout, UiTarget};
pub use self::viewport::Viewport;
