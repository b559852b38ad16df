//! Stderr logger for the vision worker.
//!
//! Lines look like `[elapsed LEVEL thread module] message`, where `module`
//! is the last path segment of the log target (`worker`, `processor`, ...).
//! The thread column tells frame-worker lines apart from the launcher's.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct WorkerLogger {
    started: Instant,
}

impl Log for WorkerLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            self.started.elapsed().as_secs_f64(),
            record,
            std::thread::current().name(),
        );
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn format_line(elapsed: f64, record: &Record, thread: Option<&str>) -> String {
    let module = record.target().rsplit("::").next().unwrap_or("");
    format!(
        "[{:8.3}s {:>5} {} {}] {}",
        elapsed,
        record.level(),
        thread.unwrap_or("-"),
        module,
        record.args()
    )
}

static LOGGER: OnceLock<WorkerLogger> = OnceLock::new();

/// Install the stderr logger, or change its level if it is already installed.
///
/// Fails only when a different `log` backend was installed first.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| WorkerLogger {
            started: Instant::now(),
        });
        log::set_logger(logger)?;
    }
    log::set_max_level(level);
    Ok(())
}

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Span close events are reported, so every instrumented frame cycle shows
/// its own duration. Fails if a global subscriber is already set.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_thread_names(true);
    if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    }
}
