// Copyright 2025 Oxide Computer Company

//! Contract-relevant constraints of a parameter, and the policy used to
//! decide whether a candidate's constraints are compatible with a contract's

use crate::model::{Parameter, ParameterType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot of the fields of a [`Parameter`] that clients depend on
///
/// Two snapshots are equal iff all five fields are equal.
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
pub struct ParameterConstraints {
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    pub required: bool,
    pub maximum: Option<Decimal>,
    pub max_items: usize,
    pub max_length: Option<usize>,
}

impl ParameterConstraints {
    pub fn new(
        param_type: ParameterType,
        required: bool,
        maximum: Option<Decimal>,
        max_items: usize,
        max_length: Option<usize>,
    ) -> ParameterConstraints {
        ParameterConstraints {
            param_type,
            required,
            maximum,
            max_items,
            max_length,
        }
    }
}

impl From<&Parameter> for ParameterConstraints {
    fn from(parameter: &Parameter) -> ParameterConstraints {
        ParameterConstraints {
            param_type: parameter.param_type,
            required: parameter.required,
            maximum: parameter.maximum,
            max_items: parameter.max_items,
            max_length: parameter.max_length,
        }
    }
}

impl fmt::Display for ParameterConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type={} required={}", self.param_type, self.required)?;
        if let Some(maximum) = &self.maximum {
            write!(f, " maximum={}", maximum)?;
        }
        if self.max_items != 0 {
            write!(f, " max_items={}", self.max_items)?;
        }
        if let Some(max_length) = self.max_length {
            write!(f, " max_length={}", max_length)?;
        }
        Ok(())
    }
}

/// Decides whether a candidate parameter's constraints are compatible with the
/// contract's
///
/// This is the only place that compares constraints.  The verifier asks the
/// policy and never looks at individual fields itself.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ConstraintPolicy {
    /// Any difference at all is a mismatch.
    #[default]
    Exact,
    /// A candidate may loosen the contract's bounds or stop requiring the
    /// parameter, but may not change its type, newly require it, or tighten
    /// any bound.
    AllowRelaxation,
}

impl ConstraintPolicy {
    pub fn is_compatible(
        self,
        contract: &ParameterConstraints,
        candidate: &ParameterConstraints,
    ) -> bool {
        match self {
            ConstraintPolicy::Exact => contract == candidate,
            ConstraintPolicy::AllowRelaxation => {
                contract.param_type == candidate.param_type
                    && (contract.required || !candidate.required)
                    && bound_relaxed(&contract.maximum, &candidate.maximum)
                    && bound_relaxed(
                        &nonzero(contract.max_items),
                        &nonzero(candidate.max_items),
                    )
                    && bound_relaxed(
                        &contract.max_length,
                        &candidate.max_length,
                    )
            }
        }
    }
}

impl fmt::Display for ConstraintPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstraintPolicy::Exact => "exact",
            ConstraintPolicy::AllowRelaxation => "allow-relaxation",
        })
    }
}

/// An upper bound is relaxed if the candidate drops it or raises it.
fn bound_relaxed<T: PartialOrd>(
    contract: &Option<T>,
    candidate: &Option<T>,
) -> bool {
    match (contract, candidate) {
        (_, None) => true,
        (None, Some(_)) => false,
        (Some(contract), Some(candidate)) => candidate >= contract,
    }
}

fn nonzero(max_items: usize) -> Option<usize> {
    (max_items != 0).then_some(max_items)
}
