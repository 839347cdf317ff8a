use std::error::Error;
use std::io;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc, writer::BoxMakeWriter};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset: 0 = info, 1 = debug, 2+ = trace.
fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        // keep reqwest's connection chatter out of debug logs
        1 => "debug,hyper_util=warn,rustls=warn",
        _ => "trace",
    }
}

/// Daily-rotated appender next to `path`; "watchlist.log" rotates as watchlist.<date>.
fn file_appender(path: &Path) -> Result<RollingFileAppender, Box<dyn Error>> {
    let dir = path.parent().ok_or("log file path has no parent directory")?;
    std::fs::create_dir_all(dir)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or("invalid log file name")?;
    let prefix = file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem);
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .build(dir)?;
    Ok(appender)
}

/// Install the global subscriber.
///
/// With `log_file` set, events go to a daily-rotated file next to it (the
/// terminal UI owns stdout/stderr while running). If that file cannot be
/// created, events are discarded so startup still goes ahead. Otherwise
/// they go to stderr. `RUST_LOG_JSON=true` switches the sink to JSON lines.
pub fn init(verbose: u8, log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let json = std::env::var("RUST_LOG_JSON").is_ok_and(|v| v == "true");
    let registry = Registry::default().with(filter);

    let mut unavailable = None;
    let (writer, ansi) = match log_file {
        Some(path) => match file_appender(path) {
            Ok(appender) => (BoxMakeWriter::new(appender), false),
            Err(e) => {
                unavailable = Some((path, e));
                (BoxMakeWriter::new(io::sink), false)
            }
        },
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    if json {
        let layer = fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(writer);
        registry.with(layer).try_init()?;
    } else {
        let layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(ansi)
            .with_writer(writer);
        registry.with(layer).try_init()?;
    }

    if let Some((path, e)) = unavailable {
        tracing::warn!(path = %path.display(), error = %e, "log file unavailable, discarding logs");
    }

    Ok(())
}
