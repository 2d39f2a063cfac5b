use std::time::{Duration, Instant};

use sdl2::Sdl;
use tracing::{debug, info, trace};

use crate::config::EditorConfig;
use crate::constants::{LOOP_TIME, MIN_WINDOW_SIZE, TITLE};
use crate::editor::Editor;
use crate::error::{EditorError, EditorResult};
use crate::formatter;
use crate::platform;
use crate::plot::Plot;

/// Main application wrapper that manages SDL initialization, window lifecycle, and the editor loop.
pub struct App {
    pub editor: Editor,
    focused: bool,
    // Keep SDL alive for the app lifetime so the video subsystem is not shut down
    _sdl_context: Sdl,
}

impl App {
    /// Initializes SDL, creates the editor window, and sets up the editor state.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::Sdl` if any SDL initialization step fails.
    pub fn new(config: EditorConfig, plot: Option<Plot>) -> EditorResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(EditorError::Sdl)?;
        trace!("Yielding after SDL init");
        platform::yield_to_browser();

        debug!("Initializing SDL2 subsystems");
        let video_subsystem = sdl_context.video().map_err(EditorError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(EditorError::Sdl)?;
        platform::yield_to_browser();

        let size = config.window_size();
        trace!(width = size.x, height = size.y, "Creating editor window");
        let mut window = video_subsystem
            .window(TITLE, size.x, size.y)
            .resizable()
            .position_centered()
            .build()
            .map_err(|e| EditorError::Sdl(e.to_string()))?;
        window
            .set_minimum_size(MIN_WINDOW_SIZE.x, MIN_WINDOW_SIZE.y)
            .map_err(|e| EditorError::Sdl(e.to_string()))?;

        trace!("Creating hardware-accelerated canvas");
        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| EditorError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");
        platform::yield_to_browser();

        // Plot names are typed through SDL text input events
        video_subsystem.text_input().start();

        info!("Starting editor initialization");
        let editor = Editor::new(canvas, event_pump, config, plot)?;
        trace!("Yielding after editor init");
        platform::yield_to_browser();

        info!("Application initialization completed successfully");
        Ok(App {
            editor,
            focused: true,
            _sdl_context: sdl_context,
        })
    }

    /// Executes a single frame of the editor loop, sleeping for whatever is left of `LOOP_TIME`.
    ///
    /// # Returns
    ///
    /// `true` if the editor should keep running, `false` if exit was requested.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        formatter::increment_frame();

        if self.editor.tick() {
            return false;
        }

        self.focused = self.editor.is_focused();

        if start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                platform::sleep(time, self.focused);
            }
        }

        true
    }
}
