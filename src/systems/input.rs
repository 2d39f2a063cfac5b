use std::collections::HashMap;
use std::path::PathBuf;

use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{NonSendMut, Res, ResMut},
};
use glam::{UVec2, Vec2};
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::{Keycode, Mod},
    mouse::{MouseButton, MouseWheelDirection},
    EventPump,
};
use tracing::trace;

use crate::events::{DialogInput, DialogRow, EditorCommand, EditorEvent};
use crate::plot::PALETTE;
use crate::systems::dialog::DialogState;
use crate::systems::ui::{UiLayout, UiTarget};

#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<Keycode, EditorCommand>,
    ctrl_bindings: HashMap<Keycode, EditorCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Palette selection, both on the number row and the keypad
        let number_row = [
            Keycode::Num1,
            Keycode::Num2,
            Keycode::Num3,
            Keycode::Num4,
            Keycode::Num5,
            Keycode::Num6,
            Keycode::Num7,
            Keycode::Num8,
            Keycode::Num9,
        ];
        let keypad = [
            Keycode::Kp1,
            Keycode::Kp2,
            Keycode::Kp3,
            Keycode::Kp4,
            Keycode::Kp5,
            Keycode::Kp6,
            Keycode::Kp7,
            Keycode::Kp8,
            Keycode::Kp9,
        ];
        for (brush, (number, pad)) in PALETTE.iter().zip(number_row.into_iter().zip(keypad)) {
            key_bindings.insert(number, EditorCommand::SelectBrush(*brush));
            key_bindings.insert(pad, EditorCommand::SelectBrush(*brush));
        }

        // Levels and view
        key_bindings.insert(Keycode::PageUp, EditorCommand::NextLevel);
        key_bindings.insert(Keycode::PageDown, EditorCommand::PreviousLevel);
        key_bindings.insert(Keycode::Home, EditorCommand::FitView);
        key_bindings.insert(Keycode::Delete, EditorCommand::OpenClearDialog);

        // It doesn't really make sense to have this available in the browser
        #[cfg(not(target_os = "emscripten"))]
        {
            key_bindings.insert(Keycode::Escape, EditorCommand::Exit);
            key_bindings.insert(Keycode::Q, EditorCommand::Exit);
        }

        let mut ctrl_bindings = HashMap::new();
        ctrl_bindings.insert(Keycode::S, EditorCommand::OpenSaveDialog);
        ctrl_bindings.insert(Keycode::O, EditorCommand::OpenOfficialDialog);

        Self {
            key_bindings,
            ctrl_bindings,
        }
    }
}

impl Bindings {
    /// The command bound to a key press. Modified presses fall back to the plain binding when no modified one exists.
    pub fn command(&self, key: Keycode, ctrl: bool) -> Option<EditorCommand> {
        let modified = ctrl.then(|| self.ctrl_bindings.get(&key)).flatten();
        modified.or_else(|| self.key_bindings.get(&key)).cloned()
    }
}

/// A platform-independent input, reduced from an SDL event.
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleInput {
    PointerDown(Vec2),
    PointerUp(Vec2),
    PointerMove(Vec2),
    /// The pointer left the window.
    PointerLeave,
    /// Wheel notches; positive scrolls away from the user.
    Wheel(f32),
    KeyDown {
        key: Keycode,
        ctrl: bool,
    },
    KeyUp(Keycode),
    Text(String),
    Resized(UVec2),
    FileDropped(PathBuf),
    Exposed,
    Quit,
}

/// What a held pointer button is doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerMode {
    #[default]
    Idle,
    /// A paint stroke is in progress.
    Drawing,
    /// The grid is being dragged around.
    Panning,
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    /// Last known pointer position, in window coordinates.
    pub cursor: Vec2,
    /// Space is held: pointer drags pan instead of painting.
    pub pan_key_held: bool,
    pub mode: PointerMode,
}

/// Reduces an SDL event to the inputs the editor cares about.
pub fn simplify_event(event: Event) -> Option<SimpleInput> {
    match event {
        Event::Quit { .. } => Some(SimpleInput::Quit),
        Event::MouseButtonDown {
            mouse_btn: MouseButton::Left,
            x,
            y,
            ..
        } => Some(SimpleInput::PointerDown(Vec2::new(x as f32, y as f32))),
        Event::MouseButtonUp {
            mouse_btn: MouseButton::Left,
            x,
            y,
            ..
        } => Some(SimpleInput::PointerUp(Vec2::new(x as f32, y as f32))),
        Event::MouseMotion { x, y, .. } => Some(SimpleInput::PointerMove(Vec2::new(x as f32, y as f32))),
        Event::MouseWheel { y, direction, .. } => {
            let notches = match direction {
                MouseWheelDirection::Flipped => -y,
                _ => y,
            };
            Some(SimpleInput::Wheel(notches as f32))
        }
        // Repeats are only useful for deleting text.
        Event::KeyDown {
            keycode: Some(key),
            keymod,
            repeat,
            ..
        } if !repeat || key == Keycode::Backspace => Some(SimpleInput::KeyDown {
            key,
            ctrl: keymod.intersects(Mod::LCTRLMOD | Mod::RCTRLMOD | Mod::LGUIMOD | Mod::RGUIMOD),
        }),
        Event::KeyUp {
            keycode: Some(key),
            repeat: false,
            ..
        } => Some(SimpleInput::KeyUp(key)),
        Event::TextInput { text, .. } => Some(SimpleInput::Text(text)),
        Event::DropFile { filename, .. } => Some(SimpleInput::FileDropped(PathBuf::from(filename))),
        Event::Window { win_event, .. } => match win_event {
            WindowEvent::SizeChanged(width, height) => {
                Some(SimpleInput::Resized(UVec2::new(width.max(0) as u32, height.max(0) as u32)))
            }
            WindowEvent::Exposed => Some(SimpleInput::Exposed),
            WindowEvent::Leave => Some(SimpleInput::PointerLeave),
            _ => None,
        },
        _ => None,
    }
}

/// Translates a frame's inputs into editor events.
///
/// While a dialog is open it receives every key, text and click; the toolbar and canvas are inert.
pub fn process_inputs(
    state: &mut InputState,
    bindings: &Bindings,
    ui: &UiLayout,
    dialog: &DialogState,
    inputs: &[SimpleInput],
) -> Vec<EditorEvent> {
    let mut events = Vec::new();
    let mut emit = |command: EditorCommand| events.push(EditorEvent::Command(command));

    for input in inputs {
        match input {
            SimpleInput::Quit => emit(EditorCommand::Exit),
            SimpleInput::Resized(size) => emit(EditorCommand::Resize(*size)),
            SimpleInput::Exposed => emit(EditorCommand::Redraw),
            SimpleInput::PointerMove(position) => {
                let delta = *position - state.cursor;
                state.cursor = *position;

                // A dialog opened mid-drag ends the drag
                if dialog.is_open() {
                    if state.mode == PointerMode::Drawing {
                        emit(EditorCommand::EndStroke);
                    }
                    state.mode = PointerMode::Idle;
                    continue;
                }

                match state.mode {
                    PointerMode::Panning => emit(EditorCommand::PanBy(delta)),
                    PointerMode::Drawing if ui.in_canvas(*position) => emit(EditorCommand::PaintAt(ui.to_canvas(*position))),
                    // Leaving the canvas ends the stroke
                    PointerMode::Drawing => {
                        state.mode = PointerMode::Idle;
                        emit(EditorCommand::EndStroke);
                    }
                    PointerMode::Idle => {}
                }
            }
            SimpleInput::PointerUp(position) => {
                state.cursor = *position;
                if state.mode == PointerMode::Drawing {
                    emit(EditorCommand::EndStroke);
                }
                state.mode = PointerMode::Idle;
            }
            SimpleInput::PointerLeave => {
                if state.mode == PointerMode::Drawing {
                    emit(EditorCommand::EndStroke);
                }
                state.mode = PointerMode::Idle;
            }
            SimpleInput::KeyUp(Keycode::Space) => {
                state.pan_key_held = false;
                if state.mode == PointerMode::Panning {
                    state.mode = PointerMode::Idle;
                }
            }
            _ if dialog.is_open() => {
                if let Some(input) = dialog_input(state, ui, dialog, input) {
                    emit(EditorCommand::Dialog(input));
                }
            }
            SimpleInput::PointerDown(position) => {
                state.cursor = *position;
                match ui.hit(*position) {
                    Some(UiTarget::Canvas) if state.pan_key_held => state.mode = PointerMode::Panning,
                    Some(UiTarget::Canvas) => {
                        state.mode = PointerMode::Drawing;
                        emit(EditorCommand::PaintAt(ui.to_canvas(*position)));
                    }
                    Some(UiTarget::Palette(index)) => {
                        if let Some(brush) = PALETTE.get(index) {
                            emit(EditorCommand::SelectBrush(*brush));
                        }
                    }
                    Some(UiTarget::Level(level)) => emit(EditorCommand::SelectLevel(level)),
                    Some(UiTarget::Save) => emit(EditorCommand::OpenSaveDialog),
                    Some(UiTarget::Clear) => emit(EditorCommand::OpenClearDialog),
                    Some(UiTarget::LoadOfficial) => emit(EditorCommand::OpenOfficialDialog),
                    None => {}
                }
            }
            SimpleInput::Wheel(notches) => {
                if *notches != 0.0 && ui.in_canvas(state.cursor) {
                    emit(EditorCommand::ZoomAt {
                        point: ui.to_canvas(state.cursor),
                        zoom_in: *notches > 0.0,
                    });
                }
            }
            SimpleInput::KeyDown { key: Keycode::Space, .. } => {
                state.pan_key_held = true;
                if state.mode == PointerMode::Drawing {
                    state.mode = PointerMode::Idle;
                    emit(EditorCommand::EndStroke);
                }
            }
            SimpleInput::KeyDown { key, ctrl } => {
                if let Some(command) = bindings.command(*key, *ctrl) {
                    emit(command);
                }
            }
            SimpleInput::FileDropped(path) => emit(EditorCommand::OpenFile(path.clone())),
            SimpleInput::KeyUp(_) | SimpleInput::Text(_) => {}
        }
    }

    events
}

/// Maps an input to the open dialog's controls.
fn dialog_input(state: &mut InputState, ui: &UiLayout, dialog: &DialogState, input: &SimpleInput) -> Option<DialogInput> {
    let notice = matches!(dialog, DialogState::Notice { .. });
    match input {
        // Any key or click acknowledges a notice
        SimpleInput::KeyDown { .. } | SimpleInput::PointerDown(_) if notice => Some(DialogInput::Confirm),
        SimpleInput::PointerDown(position) => {
            state.cursor = *position;
            ui.dialog().hit(*position, dialog)
        }
        // Text from the key that dismissed the notice
        SimpleInput::Text(_) if notice => None,
        SimpleInput::Text(text) => Some(DialogInput::Text(text.clone())),
        SimpleInput::KeyDown { key, .. } => match *key {
            Keycode::Return | Keycode::KpEnter => Some(DialogInput::Confirm),
            Keycode::Escape => Some(DialogInput::Cancel),
            Keycode::Backspace => Some(DialogInput::Backspace),
            Keycode::Tab | Keycode::Right => Some(DialogInput::Cycle {
                row: DialogRow::Second,
                forward: true,
            }),
            Keycode::Left => Some(DialogInput::Cycle {
                row: DialogRow::Second,
                forward: false,
            }),
            Keycode::Down => Some(DialogInput::Cycle {
                row: DialogRow::First,
                forward: true,
            }),
            Keycode::Up => Some(DialogInput::Cycle {
                row: DialogRow::First,
                forward: false,
            }),
            _ => None,
        },
        _ => None,
    }
}

pub fn input_system(
    bindings: Res<Bindings>,
    ui: Res<UiLayout>,
    dialog: Res<DialogState>,
    mut state: ResMut<InputState>,
    mut writer: EventWriter<EditorEvent>,
    mut pump: NonSendMut<EventPump>,
) {
    let inputs: Vec<SimpleInput> = pump.poll_iter().filter_map(simplify_event).collect();
    if inputs.is_empty() {
        return;
    }

    trace!(count = inputs.len(), "Processing inputs");
    for event in process_inputs(&mut state, &bindings, &ui, &dialog, &inputs) {
        writer.write(event);
    }
}

