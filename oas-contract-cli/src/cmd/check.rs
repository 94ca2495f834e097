// Copyright 2025 Oxide Computer Company

use crate::{
    cmd::dispatch::FAILURE_EXIT_CODE,
    output::{
        headers::*, plural, write_human_report, write_json_report,
        OutputFormat, Styles,
    },
    source::ContractSource,
};
use anyhow::Context;
use camino::Utf8Path;
use oas_contract::{load_document, Verifier};
use owo_colors::OwoColorize;
use slog::Logger;
use std::{io, process::ExitCode};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CheckResult {
    Success,
    Failures,
}

impl CheckResult {
    pub fn to_exit_code(self) -> ExitCode {
        match self {
            CheckResult::Success => ExitCode::SUCCESS,
            CheckResult::Failures => FAILURE_EXIT_CODE.into(),
        }
    }
}

/// What to check and how to report it
pub(crate) struct CheckRequest<'a> {
    pub(crate) candidate: &'a Utf8Path,
    pub(crate) contract: &'a ContractSource,
    pub(crate) format: OutputFormat,
    pub(crate) sort: bool,
}

/// Loads both documents, verifies the candidate, and writes the report to
/// `out` using `report_styles`.  Progress and the summary go to stderr using
/// `styles`.
pub(crate) fn check_impl(
    log: &Logger,
    verifier: &Verifier,
    request: &CheckRequest<'_>,
    styles: &Styles,
    report_styles: &Styles,
    out: &mut dyn io::Write,
) -> anyhow::Result<CheckResult> {
    eprintln!(
        "{:>HEADER_WIDTH$} contract {}",
        LOADING.style(styles.success_header),
        request.contract.style(styles.filename),
    );
    let contract = request.contract.load(log, request.candidate)?;

    eprintln!(
        "{:>HEADER_WIDTH$} candidate {}",
        LOADING.style(styles.success_header),
        request.candidate.style(styles.filename),
    );
    let candidate = load_document(request.candidate).with_context(|| {
        format!("loading candidate {}", request.candidate)
    })?;

    let npaths = contract.paths.len();
    eprintln!(
        "{:>HEADER_WIDTH$} {} contract {} ({} policy)",
        CHECKING.style(styles.success_header),
        npaths.style(styles.bold),
        plural::paths(npaths),
        verifier.policy().style(styles.header),
    );

    let mut failures: Vec<_> =
        verifier.verify(&candidate, &contract).collect();
    if request.sort {
        failures.sort();
    }
    info!(log, "verification complete"; "nfailures" => failures.len());

    match request.format {
        OutputFormat::Human => {
            write_human_report(&failures, report_styles, out)
        }
        OutputFormat::Json => write_json_report(&failures, out),
    }
    .context("writing report")?;

    eprintln!("{:>HEADER_WIDTH$}", SEPARATOR);
    let nfailures = failures.len();
    if nfailures == 0 {
        eprintln!(
            "{:>HEADER_WIDTH$} {} is compatible with the contract",
            SUCCESS.style(styles.success_header),
            request.candidate.style(styles.filename),
        );
        Ok(CheckResult::Success)
    } else {
        eprintln!(
            "{:>HEADER_WIDTH$} {} breaking {} found in {}",
            FAILURE.style(styles.failure_header),
            nfailures.style(styles.bold),
            plural::changes(nfailures),
            request.candidate.style(styles.filename),
        );
        Ok(CheckResult::Failures)
    }
}
