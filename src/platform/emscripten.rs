//! Emscripten platform implementation.

use std::borrow::Cow;
use std::ffi::CString;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use std::ffi::c_void;
use std::os::raw::c_int;

use sdl2::rwops::RWops;

use crate::asset::Asset;
use crate::error::{AssetError, PlatformError};
use crate::formatter::CustomFormatter;

/// Callback function type for emscripten main loop
pub type EmMainLoopCallback = unsafe extern "C" fn(*mut c_void);

// Emscripten FFI functions
extern "C" {
    fn emscripten_sleep(ms: u32);
    fn printf(format: *const u8, ...) -> i32;

    /// Set up a browser-friendly main loop with argument passing.
    /// - `func`: callback to run each frame
    /// - `arg`: user data pointer passed to callback
    /// - `fps`: target FPS (0 = use requestAnimationFrame)
    /// - `simulate_infinite_loop`: if 1, never returns
    pub fn emscripten_set_main_loop_arg(func: EmMainLoopCallback, arg: *mut c_void, fps: c_int, simulate_infinite_loop: c_int);

    /// Cancel the currently running main loop.
    pub fn emscripten_cancel_main_loop();

    /// Execute JavaScript code from Rust
    fn emscripten_run_script(script: *const i8);
}

/// Execute a JavaScript snippet from Rust.
pub fn run_script(script: &str) {
    if let Ok(cstr) = CString::new(script) {
        unsafe {
            emscripten_run_script(cstr.as_ptr());
        }
    }
}

pub fn sleep(duration: Duration, _focused: bool) {
    unsafe {
        emscripten_sleep(duration.as_millis() as u32);
    }
}

/// Yields control to browser event loop without delay.
/// Uses ASYNCIFY to pause/resume WASM execution.
pub fn yield_to_browser() {
    unsafe {
        emscripten_sleep(0);
    }
}

pub fn init_console(_force_console: bool, default_filter: &str) -> Result<(), PlatformError> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

    // Set up a custom tracing subscriber that writes directly to emscripten console
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(|| EmscriptenConsoleWriter)
                .with_ansi(false)
                .event_format(CustomFormatter),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)));

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| PlatformError::ConsoleInit(format!("Failed to set tracing subscriber: {}", e)))?;

    Ok(())
}

/// Reads an asset from the preloaded virtual filesystem.
pub fn get_asset_bytes(asset: Asset) -> Result<Cow<'static, [u8]>, AssetError> {
    let path = format!("assets/{}", asset.path());
    let mut rwops = RWops::from_file(&path, "rb").map_err(|_| AssetError::NotFound(path.clone()))?;

    let mut bytes = Vec::with_capacity(rwops.len().unwrap_or(0));
    rwops.read_to_end(&mut bytes)?;
    Ok(Cow::Owned(bytes))
}

/// Offers the file to the user as a browser download.
///
/// The bytes are staged in the in-memory filesystem, then handed to the page as a Blob.
/// `dir` is ignored; the browser picks the destination.
pub fn export_file(_dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, PlatformError> {
    let staged = PathBuf::from("/tmp").join(file_name);
    fs::create_dir_all("/tmp")
        .and_then(|_| fs::write(&staged, bytes))
        .map_err(|e| PlatformError::Export(format!("{}: {e}", staged.display())))?;

    // JSON string literals are valid JavaScript string literals
    let quote = |s: &str| serde_json::to_string(s).map_err(|e| PlatformError::Export(e.to_string()));
    let staged_literal = quote(&staged.to_string_lossy())?;
    let name_literal = quote(file_name)?;

    run_script(&format!(
        "(function() {{ \
            var data = FS.readFile({staged_literal}); \
            var blob = new Blob([data], {{ type: 'application/json' }}); \
            var link = document.createElement('a'); \
            link.href = URL.createObjectURL(blob); \
            link.download = {name_literal}; \
            document.body.appendChild(link); \
            link.click(); \
            document.body.removeChild(link); \
            URL.revokeObjectURL(link.href); \
            FS.unlink({staged_literal}); \
        }})()"
    ));

    Ok(PathBuf::from(file_name))
}

/// A writer that outputs to the browser console via printf (redirected by emscripten)
struct EmscriptenConsoleWriter;

impl Write for EmscriptenConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(s) = std::str::from_utf8(buf) {
            if let Ok(cstr) = CString::new(s.trim_end_matches('\n')) {
                unsafe {
                    printf(c"%s\n".as_ptr().cast(), cstr.as_ptr());
                }
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
