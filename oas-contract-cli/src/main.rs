// Copyright 2025 Oxide Computer Company

//! Command-line interface to oas-contract

#[macro_use]
extern crate newtype_derive;
#[macro_use]
extern crate slog;

mod cmd;
mod config;
mod git;
mod output;
mod source;

use clap::Parser;
use cmd::dispatch::App;
use std::process::ExitCode;

fn main() -> ExitCode {
    App::parse().exec()
}
