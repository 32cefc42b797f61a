//! Process-wide logging: `timestamp [LEVEL] message` lines appended to the
//! log file, mirrored to stderr unless quiet.

use std::{
    fmt,
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing::{debug, warn, Event, Subscriber};
use tracing_subscriber::{
    fmt::{
        format::{FormatEvent, FormatFields, Writer},
        time::{FormatTime, SystemTime},
        FmtContext, MakeWriter,
    },
    prelude::*,
    registry::LookupSpan,
    EnvFilter,
};

use crate::context::{fallback_log_file, AppContext};

#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    pub verbose: bool,
    pub console: bool,
}

/// Install the global subscriber. Returns the log file in use, if any.
///
/// Call once, before anything logs.
pub fn init(ctx: Option<&AppContext>, opts: LogOptions) -> Option<PathBuf> {
    let default_filter = if opts.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let (log_path, log_file) = match open_log_file(ctx.map(AppContext::log_file), &fallback_log_file(&cwd)) {
        Some((path, file)) => (Some(path), Some(file)),
        None => (None, None),
    };

    let console = opts.console.then_some(std::io::stderr);
    subscriber(filter, log_file, console).init();

    match &log_path {
        Some(path) => debug!("Logging to {}", path.display()),
        None => warn!("No writable log file location; logging to the console only"),
    }
    log_path
}

/// Registry with a file layer when a log file is open and a console layer
/// when `console` is given. Either may be absent.
fn subscriber<W>(filter: EnvFilter, log_file: Option<File>, console: Option<W>) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let file_layer = log_file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .event_format(LineFormat)
            .with_writer(Mutex::new(file))
    });

    let console_layer = console.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .event_format(LineFormat)
            .with_writer(writer)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
}

/// Open the primary log file for appending, else the fallback.
fn open_log_file(primary: Option<PathBuf>, fallback: &Path) -> Option<(PathBuf, File)> {
    primary
        .into_iter()
        .chain(std::iter::once(fallback.to_path_buf()))
        .find_map(|path| open_append(&path).map(|file| (path, file)))
}

fn open_append(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// `2026-10-16T09:30:00.123456Z [INFO] message`
struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        SystemTime.format_time(&mut writer)?;
        write!(writer, " [{}] ", event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
