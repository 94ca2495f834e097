// Copyright 2025 Oxide Computer Company

//! Facilities shared by this crate's tests and by consumers testing their own
//! use of the verifier

use camino::Utf8Path;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use slog::Logger;
use std::fmt::Debug;

/// Load an object of type `T` (usually a hunk of configuration) from the
/// string `contents`.  `label` is used as an identifying string in a log
/// message.  It should be unique for each test.
pub fn read_config<T: DeserializeOwned + Debug>(
    label: &str,
    contents: &str,
) -> Result<T, toml::de::Error> {
    let result = toml::from_str(contents);
    eprintln!("config \"{}\": {:?}", label, result);
    result
}

/// Returns a logger that drops every record.
pub fn discard_logger() -> Logger {
    Logger::root(slog::Discard, o!())
}

/// A Bunyan log record, limited to the fields tests look at
#[derive(Debug, Deserialize)]
pub struct BunyanLogRecord {
    pub name: String,
    pub msg: String,
    /// numeric Bunyan level (30 = info, 40 = warn, ...)
    pub level: u8,
    pub v: usize,
}

/// Read a file containing a Bunyan-format log, returning an array of records.
pub fn read_bunyan_log(logpath: &Utf8Path) -> Vec<BunyanLogRecord> {
    let log_contents = std::fs::read_to_string(logpath).unwrap();
    log_contents
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str::<BunyanLogRecord>(line).unwrap())
        .collect()
}
