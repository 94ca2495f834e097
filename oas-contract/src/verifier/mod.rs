// Copyright 2025 Oxide Computer Company

//! Walks a contract document and reports every way a candidate breaks it
//!
//! Traversal is strictly top-down: paths, then methods, then parameters.
//! Only the contract is walked, so anything the candidate adds (paths,
//! methods, optional parameters) is never reported.  Failures come out in
//! contract order:
//!
//! 1. path order of the contract document
//! 2. method order of the contract path item
//! 3. within one operation: missing parameters, then newly-required
//!    parameters, then incompatible parameters
//!
//! Callers that want some other order (or that verify paths in parallel and
//! merge the results) must sort the failures themselves.

mod operations;
mod parameters;

use crate::config::ConfigVerifier;
use crate::constraints::ConstraintPolicy;
use crate::failure::VerificationFailure;
use crate::model::Document;
use itertools::Either;
use slog::Logger;

/// Checks `candidate` against `contract` using exact constraint matching.
///
/// This is the same as [`Verifier::verify`] on a verifier with the default
/// policy and no logging.  The returned iterator is lazy: nothing under a
/// contract path is examined until the iterator gets there.
pub fn verify<'a>(
    candidate: &'a Document,
    contract: &'a Document,
) -> impl Iterator<Item = VerificationFailure> + 'a {
    verify_paths(
        Logger::root(slog::Discard, o!()),
        ConstraintPolicy::default(),
        candidate,
        contract,
    )
}

/// Checks candidate API descriptions against contracts
#[derive(Clone, Debug)]
pub struct Verifier {
    log: Logger,
    policy: ConstraintPolicy,
}

impl Verifier {
    /// Returns a verifier that uses exact constraint matching and logs to a
    /// child of `log`.
    pub fn new(log: &Logger) -> Verifier {
        Verifier {
            log: log.new(o!("component" => "verifier")),
            policy: ConstraintPolicy::default(),
        }
    }

    pub fn from_config(log: &Logger, config: &ConfigVerifier) -> Verifier {
        Verifier::new(log).with_policy(config.constraint_policy)
    }

    pub fn with_policy(mut self, policy: ConstraintPolicy) -> Verifier {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ConstraintPolicy {
        self.policy
    }

    /// Checks `candidate` against `contract`.  See the module documentation
    /// for the order in which failures are produced.
    pub fn verify<'a>(
        &self,
        candidate: &'a Document,
        contract: &'a Document,
    ) -> impl Iterator<Item = VerificationFailure> + 'a {
        verify_paths(self.log.clone(), self.policy, candidate, contract)
    }
}

/// Where in the contract a check is happening
///
/// `method` is empty until the traversal reaches an operation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct VerificationContext<'a> {
    pub(crate) path: &'a str,
    pub(crate) method: &'a str,
}

impl<'a> VerificationContext<'a> {
    fn new(path: &'a str) -> VerificationContext<'a> {
        VerificationContext { path, method: "" }
    }

    fn with_method(self, method: &'a str) -> VerificationContext<'a> {
        VerificationContext { method, ..self }
    }
}

fn verify_paths<'a>(
    log: Logger,
    policy: ConstraintPolicy,
    candidate: &'a Document,
    contract: &'a Document,
) -> impl Iterator<Item = VerificationFailure> + 'a {
    contract.iter_paths().flat_map(move |(path, contract_item)| {
        match candidate.path(path) {
            None => {
                debug!(log, "path missing from candidate"; "path" => path);
                Either::Left(std::iter::once(
                    VerificationFailure::MissingPath { path: path.to_owned() },
                ))
            }
            Some(candidate_item) => {
                Either::Right(operations::verify_operations(
                    log.new(o!("path" => path.to_owned())),
                    policy,
                    VerificationContext::new(path),
                    candidate_item,
                    contract_item,
                ))
            }
        }
    })
}
