// Copyright 2025 Oxide Computer Company

//! Logging configuration for programs built around the verifier
//!
//! The verifier itself only needs a [`slog::Logger`].  These types let a
//! program describe where that logger's records go in its own configuration
//! file.

use camino::Utf8PathBuf;
use serde::Deserialize;
use serde::Serialize;
use slog::Drain;
use slog::Level;
use slog::Logger;
use std::fs::OpenOptions;
use std::io;
use std::io::LineWriter;
use std::io::Write;

/// Where log records go.  This is expected to be a top-level block in a TOML
/// config file, although that's not required.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "mode")]
pub enum ConfigLogging {
    /// Human-readable output to stderr, assumed to support terminal escapes.
    StderrTerminal { level: ConfigLoggingLevel },
    /// Bunyan-formatted output to a file.
    File {
        level: ConfigLoggingLevel,
        path: Utf8PathBuf,
        if_exists: ConfigLoggingIfExists,
    },
}

impl Default for ConfigLogging {
    fn default() -> ConfigLogging {
        ConfigLogging::StderrTerminal { level: ConfigLoggingLevel::Warn }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigLoggingLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl From<ConfigLoggingLevel> for Level {
    fn from(config_level: ConfigLoggingLevel) -> Level {
        match config_level {
            ConfigLoggingLevel::Trace => Level::Trace,
            ConfigLoggingLevel::Debug => Level::Debug,
            ConfigLoggingLevel::Info => Level::Info,
            ConfigLoggingLevel::Warn => Level::Warning,
            ConfigLoggingLevel::Error => Level::Error,
            ConfigLoggingLevel::Critical => Level::Critical,
        }
    }
}

/// What to do when the log file already exists
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigLoggingIfExists {
    Fail,
    Truncate,
    Append,
}

impl ConfigLogging {
    /// Create a root logger based on the requested configuration.
    pub fn to_logger<S: AsRef<str>>(
        &self,
        log_name: S,
    ) -> Result<Logger, io::Error> {
        match self {
            ConfigLogging::StderrTerminal { level } => {
                let decorator =
                    slog_term::TermDecorator::new().stderr().build();
                let drain =
                    slog_term::FullFormat::new(decorator).build().fuse();
                Ok(async_root_logger(*level, drain))
            }

            ConfigLogging::File { level, path, if_exists } => {
                let mut open_options = OpenOptions::new();
                open_options.write(true);
                open_options.create(true);
                match if_exists {
                    ConfigLoggingIfExists::Fail => {
                        open_options.create_new(true);
                    }
                    ConfigLoggingIfExists::Append => {
                        open_options.append(true);
                    }
                    ConfigLoggingIfExists::Truncate => {
                        open_options.truncate(true);
                    }
                }

                let drain = log_drain_for_file(
                    &open_options,
                    path,
                    log_name.as_ref().to_string(),
                )?;
                let logger = async_root_logger(*level, drain);

                // Leave a note on stderr so that whoever is watching the
                // terminal knows where everything else went.  Failing to do so
                // is not worth failing the program over, but it's worth a
                // record in the log itself.
                if let Err(err) = writeln!(
                    io::stderr(),
                    "note: configured to log to \"{path}\"",
                ) {
                    warn!(
                        logger,
                        "failed to report log path on stderr";
                        "err" => %err,
                    );
                }

                Ok(logger)
            }
        }
    }
}

// The async drain takes care of synchronization between threads that share the
// logger.  Records still queued when the last logger handle is dropped are
// flushed by the drain's worker thread.
fn async_root_logger<T>(level: ConfigLoggingLevel, drain: T) -> Logger
where
    T: slog::Drain + Send + 'static,
    <T as slog::Drain>::Err: std::fmt::Debug,
{
    let level_drain = slog::LevelFilter(drain, Level::from(level)).fuse();
    let async_drain =
        slog_async::Async::new(level_drain).chan_size(1024).build().fuse();
    Logger::root(async_drain, o!())
}

fn log_drain_for_file(
    open_options: &OpenOptions,
    path: &Utf8PathBuf,
    log_name: String,
) -> Result<slog::Fuse<slog_json::Json<LineWriter<std::fs::File>>>, io::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Buffer writes to the file around newlines to minimize syscalls.
    let file = LineWriter::new(open_options.open(path)?);

    // The bunyan interface wants a `&'static str` for the logger's name.  We
    // only create a handful of root loggers per process, so leaking the name
    // is acceptable.
    let log_name: &'static str = Box::leak(log_name.into_boxed_str());
    Ok(slog_bunyan::with_name(log_name, file).build().fuse())
}
