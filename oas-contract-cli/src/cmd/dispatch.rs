// Copyright 2025 Oxide Computer Company

use crate::{
    cmd::check::{check_impl, CheckRequest},
    config::ConfigFile,
    output::{OutputFormat, OutputOpts},
    source::ContractSource,
};
use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use oas_contract::{ConstraintPolicy, Verifier};
use std::process::ExitCode;

/// Check OpenAPI documents for backward compatibility with a published
/// contract.
#[derive(Debug, Parser)]
#[clap(name = "oas-contract")]
pub struct App {
    #[clap(flatten)]
    output_opts: OutputOpts,

    /// Read verifier and logging configuration from this TOML file.
    #[clap(
        long,
        global = true,
        env("OAS_CONTRACT_CONFIG"),
        value_name("FILE")
    )]
    config: Option<Utf8PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

impl App {
    pub fn exec(self) -> ExitCode {
        let result = self.load_config().and_then(|config| match self.command {
            Command::Check(args) => args.exec(&config, &self.output_opts),
        });

        match result {
            Ok(exit_code) => exit_code,
            Err(error) => {
                eprintln!("failure: {:#}", error);
                ExitCode::FAILURE
            }
        }
    }

    fn load_config(&self) -> Result<ConfigFile> {
        match &self.config {
            Some(path) => ConfigFile::from_file(path),
            None => Ok(ConfigFile::default()),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a candidate OpenAPI document against a contract.
    ///
    /// Every path, method, and parameter of the contract is looked up in the
    /// candidate.  Anything the candidate removed, newly requires, or
    /// constrains differently is reported.  Additions are not.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct ContractSourceArgs {
    /// Loads the contract from a local file.
    #[clap(long, value_name("FILE"))]
    contract: Option<Utf8PathBuf>,

    /// Loads the contract from path PATH in the given Git REVISION.
    ///
    /// The REVISION is not used as-is; instead, the tool always looks at the
    /// merge-base between HEAD and REVISION.  So if you provide
    /// `main:openapi/api.json`, then it will look at the merge-base of HEAD
    /// and `main`, at "openapi/api.json" in that commit.
    ///
    /// PATH is relative to the top of the repository.  It defaults to the
    /// path of the candidate document.
    #[clap(long, value_name("REVISION[:PATH]"))]
    contract_from_git: Option<String>,
}

impl ContractSourceArgs {
    pub(crate) fn to_contract_source(&self) -> ContractSource {
        assert!(self.contract.is_none() || self.contract_from_git.is_none());

        match (&self.contract, &self.contract_from_git) {
            (Some(path), _) => ContractSource::File { path: path.clone() },
            (None, Some(arg)) => ContractSource::from_git_arg(arg),
            // clap requires one of the two
            (None, None) => unreachable!("no contract source"),
        }
    }
}

/// Command-line spelling of [`ConstraintPolicy`]
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PolicyArg {
    /// constraints must match exactly
    Exact,
    /// candidates may drop or raise bounds and make parameters optional
    AllowRelaxation,
}

impl From<PolicyArg> for ConstraintPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Exact => ConstraintPolicy::Exact,
            PolicyArg::AllowRelaxation => ConstraintPolicy::AllowRelaxation,
        }
    }
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// The OpenAPI document to check (JSON, or YAML if named *.yaml or
    /// *.yml).
    #[clap(long, value_name("FILE"))]
    candidate: Utf8PathBuf,

    #[clap(flatten)]
    contract: ContractSourceArgs,

    /// How to print failures on stdout.
    #[clap(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Sort failures instead of reporting them in contract order.
    #[clap(long)]
    sort: bool,

    /// How parameter constraints are compared (overrides the config file).
    #[clap(long, value_enum)]
    policy: Option<PolicyArg>,
}

impl CheckArgs {
    fn exec(
        self,
        config: &ConfigFile,
        output: &OutputOpts,
    ) -> anyhow::Result<ExitCode> {
        let log = config
            .log
            .to_logger("oas-contract")
            .context("creating logger")?;
        let mut verifier = Verifier::from_config(&log, &config.verifier);
        if let Some(policy) = self.policy {
            verifier = verifier.with_policy(policy.into());
        }

        let contract = self.contract.to_contract_source();
        let request = CheckRequest {
            candidate: &self.candidate,
            contract: &contract,
            format: self.format,
            sort: self.sort,
        };
        let styles = output.styles(supports_color::Stream::Stderr);
        let report_styles = output.styles(supports_color::Stream::Stdout);
        let mut stdout = std::io::stdout().lock();
        Ok(check_impl(
            &log,
            &verifier,
            &request,
            &styles,
            &report_styles,
            &mut stdout,
        )?
        .to_exit_code())
    }
}

// This code is not 0 or 1 (general anyhow errors) and indicates that the
// candidate breaks the contract.
pub(crate) const FAILURE_EXIT_CODE: u8 = 100;
