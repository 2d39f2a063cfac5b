//! Desktop platform implementation.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rust_embed::Embed;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::asset::Asset;
use crate::error::{AssetError, PlatformError};
use crate::formatter::CustomFormatter;

/// Everything under `assets/`, embedded at compile time.
#[derive(Embed)]
#[folder = "assets/"]
struct Assets;

pub fn sleep(duration: Duration, focused: bool) {
    if focused {
        spin_sleep::sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}

/// Only needed in the browser, where long initialization blocks the page.
pub fn yield_to_browser() {}

/// Sets up console output (attaching to the parent console on Windows) and installs the tracing subscriber.
///
/// `default_filter` applies when `RUST_LOG` is unset.
pub fn init_console(force_console: bool, default_filter: &str) -> Result<(), PlatformError> {
    #[cfg(windows)]
    attach_console(force_console)?;
    #[cfg(not(windows))]
    let _ = force_console;

    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(true).event_format(CustomFormatter))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| PlatformError::ConsoleInit(format!("Failed to set tracing subscriber: {e}")))
}

pub fn get_asset_bytes(asset: Asset) -> Result<Cow<'static, [u8]>, AssetError> {
    let path = asset.path();
    Assets::get(&path)
        .map(|file| file.data)
        .ok_or_else(|| AssetError::NotFound(path.into_owned()))
}

/// Writes a file into `dir`, creating the directory if needed.
pub fn export_file(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, PlatformError> {
    let path = dir.join(file_name);
    fs::create_dir_all(dir)
        .and_then(|_| fs::write(&path, bytes))
        .map_err(|e| PlatformError::Export(format!("{}: {e}", path.display())))?;
    Ok(path)
}

/* Internal functions */

/// Routes output to a console when there is one to use.
///
/// A console-less launch (e.g. from Explorer) stays silent unless `force_console` asks for a new console window.
#[cfg(windows)]
fn attach_console(force_console: bool) -> Result<(), PlatformError> {
    use windows::Win32::System::Console::{AllocConsole, GetConsoleWindow};

    // Check if we already have a console window
    if unsafe { !GetConsoleWindow().0.is_null() } {
        return Ok(());
    }

    if is_output_setup()?.is_some() {
        return Ok(());
    }

    match attach_to_parent_console() {
        Ok(()) => Ok(()),
        Err(_) if force_console => unsafe { AllocConsole() }
            .map_err(|e| PlatformError::ConsoleInit(format!("Failed to allocate console: {e:?}"))),
        // Launched without a parent console; logs have nowhere to go
        Err(_) => Ok(()),
    }
}

/// Check if the output stream has been setup by a parent process
/// Windows-only
#[cfg(windows)]
fn is_output_setup() -> Result<Option<&'static str>, PlatformError> {
    use windows::Win32::Storage::FileSystem::{
        GetFileType, FILE_TYPE_CHAR, FILE_TYPE_DISK, FILE_TYPE_PIPE, FILE_TYPE_REMOTE, FILE_TYPE_UNKNOWN,
    };

    use windows_sys::Win32::{
        Foundation::INVALID_HANDLE_VALUE,
        System::Console::{GetStdHandle, STD_OUTPUT_HANDLE},
    };

    let handle = match unsafe { GetStdHandle(STD_OUTPUT_HANDLE) } {
        INVALID_HANDLE_VALUE => {
            return Err(PlatformError::ConsoleInit("Invalid handle".to_string()));
        }
        handle => handle,
    };

    // Pipes, terminals and files redirected by a parent are trusted as output destinations
    let file_type = match unsafe {
        use windows::Win32::Foundation::HANDLE;
        GetFileType(HANDLE(handle))
    } {
        FILE_TYPE_PIPE => Some("pipe"),
        FILE_TYPE_CHAR => Some("char"),
        FILE_TYPE_DISK => Some("disk"),
        FILE_TYPE_UNKNOWN | FILE_TYPE_REMOTE => None,
        _ => None,
    };

    Ok(file_type)
}

/// Try to attach to parent console
/// Windows-only
#[cfg(windows)]
fn attach_to_parent_console() -> Result<(), PlatformError> {
    use windows::{
        core::PCSTR,
        Win32::{
            Foundation::{GENERIC_READ, GENERIC_WRITE},
            Storage::FileSystem::{CreateFileA, FILE_FLAGS_AND_ATTRIBUTES, FILE_SHARE_READ, FILE_SHARE_WRITE, OPEN_EXISTING},
            System::Console::{
                AttachConsole, FreeConsole, SetStdHandle, ATTACH_PARENT_PROCESS, STD_ERROR_HANDLE, STD_OUTPUT_HANDLE,
            },
        },
    };

    unsafe { AttachConsole(ATTACH_PARENT_PROCESS) }
        .map_err(|e| PlatformError::ConsoleInit(format!("Failed to attach to parent console: {e:?}")))?;

    let handle = unsafe {
        let pcstr = PCSTR::from_raw(c"CONOUT$".as_ptr() as *const u8);
        CreateFileA::<PCSTR>(
            pcstr,
            (GENERIC_READ | GENERIC_WRITE).0,
            FILE_SHARE_READ | FILE_SHARE_WRITE,
            None,
            OPEN_EXISTING,
            FILE_FLAGS_AND_ATTRIBUTES(0),
            None,
        )
    }
    .map_err(|e| PlatformError::ConsoleInit(format!("Failed to create console handle: {e:?}")))?;

    let redirected = unsafe { SetStdHandle(STD_OUTPUT_HANDLE, handle) }
        .and_then(|_| unsafe { SetStdHandle(STD_ERROR_HANDLE, handle) })
        .map_err(|e| PlatformError::ConsoleInit(format!("Failed to set console handles: {e:?}")));

    if let Err(handle_error) = redirected {
        unsafe { FreeConsole() }.map_err(|free_error| {
            PlatformError::ConsoleInit(format!(
                "Failed to free console after SetStdHandle failed: {free_error:?} ({handle_error:?})"
            ))
        })?;
        return Err(handle_error);
    }

    Ok(())
}
