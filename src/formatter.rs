//! Log line formatting with a frame counter.
//!
//! Lines read `12:04:33.51234 0x01A4  INFO span{field}: target: message`, where the hex number is the
//! editor frame the event was logged in. Useful for lining up input and redraw events.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Only the low 16 bits are printed.
const FRAME_DISPLAY_MASK: u64 = 0xFFFF;

#[cfg(target_os = "emscripten")]
const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:3]");

#[cfg(not(target_os = "emscripten"))]
const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:5]");

const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Event formatter: timestamp, frame number, level, span chain, target, fields.
pub struct CustomFormatter;

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
        write_styled(&mut writer, DIM, timestamp)?;
        writer.write_char(' ')?;

        write_styled(&mut writer, DIM, format_args!("0x{:04X}", frame_count() & FRAME_DISPLAY_MASK))?;
        writer.write_char(' ')?;

        write_level(&mut writer, meta.level())?;
        writer.write_char(' ')?;

        if let Some(scope) = ctx.event_scope() {
            let mut any = false;
            for span in scope.from_root() {
                any = true;
                write_styled(&mut writer, BOLD, span.metadata().name())?;
                let extensions = span.extensions();
                if let Some(fields) = extensions.get::<FormattedFields<N>>().filter(|f| !f.is_empty()) {
                    write_styled(&mut writer, BOLD, "{")?;
                    write!(writer, "{fields}")?;
                    write_styled(&mut writer, BOLD, "}")?;
                }
                write_styled(&mut writer, DIM, ":")?;
            }
            if any {
                writer.write_char(' ')?;
            }
        }

        write_styled(&mut writer, DIM, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn write_level(writer: &mut Writer<'_>, level: &Level) -> fmt::Result {
    let (color, label) = match *level {
        Level::TRACE => ("\x1b[35m", "TRACE"),
        Level::DEBUG => ("\x1b[34m", "DEBUG"),
        Level::INFO => ("\x1b[32m", " INFO"),
        Level::WARN => ("\x1b[33m", " WARN"),
        Level::ERROR => ("\x1b[31m", "ERROR"),
    };
    write_styled(writer, color, label)
}

/// Writes `value` wrapped in an ANSI style when the writer supports it.
fn write_styled(writer: &mut Writer<'_>, style: &str, value: impl fmt::Display) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{style}{value}{RESET}")
    } else {
        write!(writer, "{value}")
    }
}

/// Advances the frame counter. Called once per frame by the main loop.
pub fn increment_frame() {
    FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);
}

pub fn frame_count() -> u64 {
    FRAME_COUNTER.load(Ordering::Relaxed)
}
