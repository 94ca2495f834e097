// Copyright 2025 Oxide Computer Company

//! Ways in which a candidate API description can break clients of a contract

use crate::constraints::ParameterConstraints;
use crate::model::ParameterKind;
use serde::Serialize;
use thiserror::Error;

/// One divergence between a candidate and its contract
///
/// These are reports, not errors in the sense of something having gone wrong
/// while checking: a run that produces any of these completed successfully.
/// Values compare (and hash and sort) by their contents.
#[derive(
    Clone,
    Debug,
    Error,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
)]
#[serde(tag = "failure", rename_all = "snake_case")]
pub enum VerificationFailure {
    #[error("path {path:?} is missing")]
    MissingPath { path: String },

    #[error("{path}: method {method:?} is missing")]
    MissingHttpMethod { path: String, method: String },

    #[error(
        "{path}: {method}: {parameter_kind} parameter {parameter_name:?} is \
         missing"
    )]
    MissingParameter {
        path: String,
        method: String,
        parameter_name: String,
        parameter_kind: ParameterKind,
    },

    #[error(
        "{path}: {method}: new {parameter_kind} parameter {parameter_name:?} \
         is required"
    )]
    ExcessRequiredParameter {
        path: String,
        method: String,
        parameter_name: String,
        parameter_kind: ParameterKind,
    },

    #[error(
        "{path}: {method}: {parameter_kind} parameter {parameter_name:?} is \
         incompatible (contract: {contract}; candidate: {candidate})"
    )]
    IncompatibleParameter {
        path: String,
        method: String,
        parameter_name: String,
        parameter_kind: ParameterKind,
        contract: ParameterConstraints,
        candidate: ParameterConstraints,
    },
}

impl VerificationFailure {
    /// Returns the contract path this failure was found under.
    pub fn path(&self) -> &str {
        match self {
            VerificationFailure::MissingPath { path }
            | VerificationFailure::MissingHttpMethod { path, .. }
            | VerificationFailure::MissingParameter { path, .. }
            | VerificationFailure::ExcessRequiredParameter { path, .. }
            | VerificationFailure::IncompatibleParameter { path, .. } => path,
        }
    }

    /// Returns the HTTP method this failure was found under, if any.
    pub fn method(&self) -> Option<&str> {
        match self {
            VerificationFailure::MissingPath { .. } => None,
            VerificationFailure::MissingHttpMethod { method, .. }
            | VerificationFailure::MissingParameter { method, .. }
            | VerificationFailure::ExcessRequiredParameter { method, .. }
            | VerificationFailure::IncompatibleParameter { method, .. } => {
                Some(method)
            }
        }
    }
}
