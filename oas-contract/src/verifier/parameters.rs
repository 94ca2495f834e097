// Copyright 2025 Oxide Computer Company

//! Compare the parameters of one candidate operation against one contract
//! operation

use super::VerificationContext;
use crate::constraints::{ConstraintPolicy, ParameterConstraints};
use crate::failure::VerificationFailure;
use crate::model::{Operation, Parameter, ParameterKind};
use indexmap::IndexMap;
use slog::Logger;

/// Parameters are identified by name and location.
type ParameterKey<'a> = (&'a str, ParameterKind);

/// Produces, in order: contract parameters the candidate lacks, candidate-only
/// parameters that are required, and shared parameters whose constraints the
/// policy rejects.  All three passes always run.
pub(super) fn verify_parameters(
    log: &Logger,
    policy: ConstraintPolicy,
    cx: VerificationContext<'_>,
    candidate: &Operation,
    contract: &Operation,
) -> std::vec::IntoIter<VerificationFailure> {
    let candidate_params = parameter_map(log, "candidate", candidate);
    let contract_params = parameter_map(log, "contract", contract);

    let missing = contract_params
        .keys()
        .filter(|key| !candidate_params.contains_key(*key))
        .map(|(name, kind)| VerificationFailure::MissingParameter {
            path: cx.path.to_owned(),
            method: cx.method.to_owned(),
            parameter_name: (*name).to_owned(),
            parameter_kind: *kind,
        });

    let excess_required = candidate_params
        .iter()
        .filter(|(key, _)| !contract_params.contains_key(*key))
        .filter(|(_, param)| param.required)
        .map(|(_, param)| VerificationFailure::ExcessRequiredParameter {
            path: cx.path.to_owned(),
            method: cx.method.to_owned(),
            parameter_name: param.name.clone(),
            parameter_kind: param.kind,
        });

    let incompatible = candidate_params
        .iter()
        .filter_map(|(key, candidate_param)| {
            let contract_param = contract_params.get(key)?;
            verify_parameter_compatibility(
                policy,
                cx,
                candidate_param,
                contract_param,
            )
        });

    missing
        .chain(excess_required)
        .chain(incompatible)
        .collect::<Vec<_>>()
        .into_iter()
}

fn verify_parameter_compatibility(
    policy: ConstraintPolicy,
    cx: VerificationContext<'_>,
    candidate: &Parameter,
    contract: &Parameter,
) -> Option<VerificationFailure> {
    let candidate_constraints = ParameterConstraints::from(candidate);
    let contract_constraints = ParameterConstraints::from(contract);

    if policy.is_compatible(&contract_constraints, &candidate_constraints) {
        return None;
    }

    Some(VerificationFailure::IncompatibleParameter {
        path: cx.path.to_owned(),
        method: cx.method.to_owned(),
        parameter_name: contract.name.clone(),
        parameter_kind: contract.kind,
        contract: contract_constraints,
        candidate: candidate_constraints,
    })
}

/// Index an operation's parameters by name and location.
///
/// If the same key appears more than once, the last one wins (keeping the
/// position of the first).
fn parameter_map<'a>(
    log: &Logger,
    which: &'static str,
    operation: &'a Operation,
) -> IndexMap<ParameterKey<'a>, &'a Parameter> {
    let mut params = IndexMap::with_capacity(operation.parameters.len());
    for param in operation.iter_parameters() {
        if params.insert((param.name.as_str(), param.kind), param).is_some() {
            warn!(log, "duplicate parameter; keeping the last one";
                "document" => which,
                "parameter" => &param.name,
                "in" => %param.kind,
            );
        }
    }
    params
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::ParameterType;
    use rust_decimal::Decimal;

    const PATH: &str = "/api/foo";
    const METHOD: &str = "get";

    struct ParameterPair {
        contract: Option<Parameter>,
        candidate: Option<Parameter>,
    }

    fn pair(contract: Parameter, candidate: Parameter) -> ParameterPair {
        ParameterPair { contract: Some(contract), candidate: Some(candidate) }
    }

    fn run(
        policy: ConstraintPolicy,
        pairs: &[ParameterPair],
    ) -> Vec<VerificationFailure> {
        let contract = pairs
            .iter()
            .filter_map(|p| p.contract.clone())
            .fold(Operation::new(), Operation::with_parameter);
        let candidate = pairs
            .iter()
            .filter_map(|p| p.candidate.clone())
            .fold(Operation::new(), Operation::with_parameter);
        let log = Logger::root(slog::Discard, o!());
        let cx = VerificationContext::new(PATH).with_method(METHOD);
        verify_parameters(&log, policy, cx, &candidate, &contract).collect()
    }

    fn missing(name: &str, kind: ParameterKind) -> VerificationFailure {
        VerificationFailure::MissingParameter {
            path: PATH.to_string(),
            method: METHOD.to_string(),
            parameter_name: name.to_string(),
            parameter_kind: kind,
        }
    }

    fn query(name: &str) -> Parameter {
        Parameter::new(name, ParameterKind::Query)
    }

    #[test]
    fn test_mismatched_parameters() {
        let pairs = [
            pair(query("ShouldMatch"), query("ShouldMatch")),
            pair(query("NameMismatch"), query("__NameMismatch")),
            pair(
                Parameter::new("KindMismatch", ParameterKind::Header),
                query("KindMismatch"),
            ),
        ];
        let failures = run(ConstraintPolicy::Exact, &pairs);
        assert_eq!(
            failures,
            vec![
                missing("NameMismatch", ParameterKind::Query),
                missing("KindMismatch", ParameterKind::Header),
            ]
        );
    }

    #[test]
    fn test_excess_required_parameters() {
        let pairs = [
            pair(
                query("BothRequired").with_required(true),
                query("BothRequired").with_required(true),
            ),
            ParameterPair {
                contract: None,
                candidate: Some(query("OptionalOnCandidate")),
            },
            ParameterPair {
                contract: None,
                candidate: Some(
                    query("RequiredOnCandidate")
                        .with_required(true)
                        .with_max_items(12),
                ),
            },
        ];
        let failures = run(ConstraintPolicy::Exact, &pairs);
        assert_eq!(
            failures,
            vec![VerificationFailure::ExcessRequiredParameter {
                path: PATH.to_string(),
                method: METHOD.to_string(),
                parameter_name: "RequiredOnCandidate".to_string(),
                parameter_kind: ParameterKind::Query,
            }]
        );
    }

    #[test]
    fn test_incompatible_parameters() {
        let int = |name: &str, required: bool| {
            query(name)
                .with_type(ParameterType::Integer)
                .with_required(required)
        };
        let string = |name: &str| query(name).with_type(ParameterType::String);
        let array = |name: &str| query(name).with_type(ParameterType::Array);

        let pairs = vec![
            pair(int("ShouldMatch", false), int("ShouldMatch", false)),
            pair(int("TypeMismatch", false), string("TypeMismatch")),
            pair(
                int("IsRequiredMismatch", true),
                int("IsRequiredMismatch", false),
            ),
            pair(
                int("MaximumMismatch", false).with_maximum(1024),
                int("MaximumMismatch", false).with_maximum(2048),
            ),
            pair(
                string("MaxLengthMismatch").with_max_length(10),
                string("MaxLengthMismatch").with_max_length(20),
            ),
            pair(
                array("MaxItemsMismatch").with_max_items(10),
                array("MaxItemsMismatch").with_max_items(20),
            ),
        ];

        let failures = run(ConstraintPolicy::Exact, &pairs);
        let expected: Vec<_> = pairs[1..]
            .iter()
            .map(|p| {
                let contract = p.contract.as_ref().unwrap();
                let candidate = p.candidate.as_ref().unwrap();
                VerificationFailure::IncompatibleParameter {
                    path: PATH.to_string(),
                    method: METHOD.to_string(),
                    parameter_name: contract.name.clone(),
                    parameter_kind: ParameterKind::Query,
                    contract: ParameterConstraints::from(contract),
                    candidate: ParameterConstraints::from(candidate),
                }
            })
            .collect();
        assert_eq!(failures, expected);

        // Apart from the type change, each of these only loosens the
        // contract.
        let relaxed = run(ConstraintPolicy::AllowRelaxation, &pairs);
        let names: Vec<_> = relaxed
            .iter()
            .map(|f| match f {
                VerificationFailure::IncompatibleParameter {
                    parameter_name,
                    ..
                } => parameter_name.as_str(),
                other => panic!("unexpected failure: {:?}", other),
            })
            .collect();
        assert_eq!(names, ["TypeMismatch"]);
    }

    #[test]
    fn test_type_change_reports_both_sides() {
        let pairs = [pair(
            query("X").with_type(ParameterType::Integer),
            query("X").with_type(ParameterType::String),
        )];
        let failures = run(ConstraintPolicy::Exact, &pairs);
        assert_eq!(failures.len(), 1);
        match &failures[0] {
            VerificationFailure::IncompatibleParameter {
                contract, candidate, ..
            } => {
                assert_eq!(contract.param_type, ParameterType::Integer);
                assert!(!contract.required);
                assert_eq!(candidate.param_type, ParameterType::String);
                assert!(!candidate.required);
            }
            other => panic!("unexpected failure: {:?}", other),
        }
    }

    #[test]
    fn test_passes_are_ordered_and_not_short_circuited() {
        let pairs = [
            pair(
                query("changed").with_type(ParameterType::Integer),
                query("changed").with_type(ParameterType::Boolean),
            ),
            ParameterPair {
                contract: None,
                candidate: Some(query("added").with_required(true)),
            },
            ParameterPair { contract: Some(query("removed")), candidate: None },
        ];
        let failures = run(ConstraintPolicy::Exact, &pairs);
        let kinds: Vec<_> = failures
            .iter()
            .map(|f| match f {
                VerificationFailure::MissingParameter { .. } => "missing",
                VerificationFailure::ExcessRequiredParameter { .. } => "excess",
                VerificationFailure::IncompatibleParameter { .. } => {
                    "incompatible"
                }
                other => panic!("unexpected failure: {:?}", other),
            })
            .collect();
        assert_eq!(kinds, ["missing", "excess", "incompatible"]);
    }

    #[test]
    fn test_duplicate_parameters_last_wins() {
        let contract = Operation::new()
            .with_parameter(query("dup").with_type(ParameterType::Integer))
            .with_parameter(query("dup").with_type(ParameterType::String));
        let candidate = Operation::new()
            .with_parameter(query("dup").with_type(ParameterType::String));
        let log = Logger::root(slog::Discard, o!());
        let cx = VerificationContext::new(PATH).with_method(METHOD);

        let failures: Vec<_> = verify_parameters(
            &log,
            ConstraintPolicy::Exact,
            cx,
            &candidate,
            &contract,
        )
        .collect();
        assert!(failures.is_empty(), "{:?}", failures);

        let map = parameter_map(&log, "contract", &contract);
        assert_eq!(map.len(), 1);
        let kept = map[&("dup", ParameterKind::Query)];
        assert_eq!(kept.param_type, ParameterType::String);
    }

    #[test]
    fn test_same_name_different_kind_are_distinct() {
        let pairs = [
            pair(
                Parameter::new("id", ParameterKind::Path).with_required(true),
                Parameter::new("id", ParameterKind::Path).with_required(true),
            ),
            pair(
                Parameter::new("id", ParameterKind::Cookie),
                Parameter::new("id", ParameterKind::Cookie)
                    .with_maximum(Decimal::new(25, 1)),
            ),
        ];
        let failures = run(ConstraintPolicy::Exact, &pairs);
        assert_eq!(failures.len(), 1);
        assert!(matches!(
            &failures[0],
            VerificationFailure::IncompatibleParameter {
                parameter_kind: ParameterKind::Cookie,
                ..
            }
        ));
    }
}
