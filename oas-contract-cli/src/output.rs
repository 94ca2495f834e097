// Copyright 2025 Oxide Computer Company

use clap::{Args, ColorChoice, ValueEnum};
use headers::*;
use oas_contract::VerificationFailure;
use owo_colors::{OwoColorize, Style};
use std::io;

#[derive(Debug, Args)]
#[clap(next_help_heading = "Global options")]
pub struct OutputOpts {
    /// Color output
    #[clap(long, value_enum, global = true, default_value_t)]
    pub(crate) color: ColorChoice,
}

impl OutputOpts {
    /// Returns true if color should be used for the stream.
    pub(crate) fn use_color(&self, stream: supports_color::Stream) -> bool {
        match self.color {
            ColorChoice::Auto => supports_color::on_cached(stream).is_some(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }

    pub(crate) fn styles(&self, stream: supports_color::Stream) -> Styles {
        let mut styles = Styles::default();
        if self.use_color(stream) {
            styles.colorize();
        }
        styles
    }
}

/// How failures are written to stdout
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// one line per failure
    #[default]
    Human,
    /// a JSON array of failures
    Json,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Styles {
    pub(crate) bold: Style,
    pub(crate) header: Style,
    pub(crate) success_header: Style,
    pub(crate) failure: Style,
    pub(crate) failure_header: Style,
    pub(crate) filename: Style,
}

impl Styles {
    pub(crate) fn colorize(&mut self) {
        self.bold = Style::new().bold();
        self.header = Style::new().purple();
        self.success_header = Style::new().green().bold();
        self.failure = Style::new().red();
        self.failure_header = Style::new().red().bold();
        self.filename = Style::new().cyan();
    }
}

/// Writes one line per failure.
pub(crate) fn write_human_report(
    failures: &[VerificationFailure],
    styles: &Styles,
    out: &mut dyn io::Write,
) -> io::Result<()> {
    for failure in failures {
        writeln!(
            out,
            "{:>HEADER_WIDTH$} {}",
            FAILURE.style(styles.failure_header),
            failure.style(styles.failure),
        )?;
    }
    Ok(())
}

/// Writes all failures as a single JSON array.
pub(crate) fn write_json_report(
    failures: &[VerificationFailure],
    out: &mut dyn io::Write,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, failures)?;
    writeln!(out)
}

pub(crate) mod headers {
    // Same width as Cargo's output.
    pub(crate) const HEADER_WIDTH: usize = 12;

    pub(crate) static SEPARATOR: &str = "-------";

    pub(crate) static LOADING: &str = "Loading";
    pub(crate) static CHECKING: &str = "Checking";

    pub(crate) static SUCCESS: &str = "Success";
    pub(crate) static FAILURE: &str = "Failure";
}

pub(crate) mod plural {
    pub(crate) fn changes(count: usize) -> &'static str {
        if count == 1 {
            "change"
        } else {
            "changes"
        }
    }

    pub(crate) fn paths(count: usize) -> &'static str {
        if count == 1 {
            "path"
        } else {
            "paths"
        }
    }
}
