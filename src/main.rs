#![cfg_attr(all(not(use_console), target_os = "windows"), windows_subsystem = "windows")]
#![cfg_attr(all(use_console, target_os = "windows"), windows_subsystem = "console")]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use pltr::app::App;
use pltr::config::EditorConfig;
use pltr::constants::LOOP_TIME;
use pltr::platform;
use pltr::storage;
use tracing::{info, warn};

// Emscripten-specific: static storage for the App instance
// Required because emscripten_set_main_loop_arg needs a persistent pointer
#[cfg(target_os = "emscripten")]
static mut APP: Option<App> = None;

/// Emscripten main loop callback - runs once per frame
#[cfg(target_os = "emscripten")]
unsafe extern "C" fn main_loop_callback(_arg: *mut std::ffi::c_void) {
    if let Some(ref mut app) = APP {
        if !app.run() {
            platform::emscripten_cancel_main_loop();
        }
    }
}

/// Command line options: `--console`/`-c` and an optional plot file to open.
struct Args {
    force_console: bool,
    plot: Option<PathBuf>,
}

fn parse_args() -> Args {
    let mut args = Args {
        force_console: false,
        plot: None,
    };
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--console" | "-c" => args.force_console = true,
            _ if args.plot.is_none() && !arg.starts_with('-') => args.plot = Some(PathBuf::from(arg)),
            _ => {}
        }
    }
    args
}

/// The main entry point of the application.
///
/// Loads the configuration, sets up logging, opens the editor window and runs the editor loop.
pub fn main() -> anyhow::Result<()> {
    // Emscripten has no command line to speak of
    #[cfg(not(target_os = "emscripten"))]
    let args = parse_args();
    #[cfg(target_os = "emscripten")]
    let args = Args {
        force_console: false,
        plot: None,
    };

    let config = EditorConfig::load().context("Could not load configuration")?;

    // On Emscripten, this connects the subscriber to the browser console
    platform::init_console(args.force_console, &config.log_filter).context("Could not initialize console")?;

    let plot = args.plot.and_then(|path| match storage::load_plot_file(&path) {
        Ok(plot) => {
            info!(path = %path.display(), name = %plot.name, "Opening plot");
            Some(plot)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not open plot, starting with an empty one");
            None
        }
    });

    let app = App::new(config, plot).context("Could not create app")?;

    info!(loop_time = ?LOOP_TIME, "Starting editor loop");

    #[cfg(target_os = "emscripten")]
    {
        use std::ptr;

        unsafe {
            APP = Some(app);
        }

        // fps=0 means use requestAnimationFrame
        // simulate_infinite_loop=1 means this call won't return
        unsafe {
            platform::emscripten_set_main_loop_arg(main_loop_callback, ptr::null_mut(), 0, 1);
        }
    }

    #[cfg(not(target_os = "emscripten"))]
    {
        let mut app = app;
        while app.run() {}
        info!("Editor closed");
    }

    Ok(())
}
