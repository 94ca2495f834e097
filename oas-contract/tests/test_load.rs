// Copyright 2025 Oxide Computer Company

//! Test cases for verifying documents loaded from OpenAPI files

use oas_contract::document_from_slice;
use oas_contract::verify;
use oas_contract::ConstraintPolicy;
use oas_contract::DocumentFormat;
use oas_contract::LoadError;
use oas_contract::ParameterKind;
use oas_contract::ParameterType;
use oas_contract::VerificationFailure;
use oas_contract::Verifier;

mod common;
use common::fixture_path;
use common::load_fixture;
use common::render;

#[test]
fn test_fixture_import() {
    let contract = load_fixture("contract.json");

    let paths: Vec<_> = contract.iter_paths().map(|(p, _)| p).collect();
    assert_eq!(
        paths,
        [
            "/projects",
            "/projects/{project}",
            "/projects/{project}/instances",
            "/health",
        ]
    );

    // Path-level parameters, resolved through the components section, are
    // applied to every operation.
    let instances = contract
        .path("/projects/{project}/instances")
        .and_then(|item| item.operation("get"))
        .unwrap();
    let project = &instances.parameters[0];
    assert_eq!(project.name, "project");
    assert_eq!(project.kind, ParameterKind::Path);
    assert_eq!(project.param_type, ParameterType::String);
    assert!(project.required);
    assert_eq!(project.max_length, Some(63));
    assert_eq!(instances.parameters[2].max_items, 10);
}

#[test]
fn test_fixture_verify() {
    let contract = load_fixture("contract.json");
    let candidate = load_fixture("candidate.yaml");

    let failures: Vec<_> = verify(&candidate, &contract).collect();
    expectorate::assert_contents(
        "tests/output/fixture-failures.txt",
        &render(&failures),
    );
}

#[test]
fn test_fixture_verify_relaxed() {
    let contract = load_fixture("contract.json");
    let candidate = load_fixture("candidate.yaml");

    let log = oas_contract::test_util::discard_logger();
    let verifier =
        Verifier::new(&log).with_policy(ConstraintPolicy::AllowRelaxation);
    let failures: Vec<_> = verifier.verify(&candidate, &contract).collect();

    // Raising the maximum of "limit" is a relaxation; everything else is
    // still a breaking change.
    assert_eq!(failures.len(), 5);
    assert!(!failures.iter().any(|f| matches!(
        f,
        VerificationFailure::IncompatibleParameter { .. }
    )));
}

#[test]
fn test_fixture_against_itself() {
    let contract = load_fixture("contract.json");
    let candidate = load_fixture("candidate.yaml");
    assert_eq!(verify(&contract, &contract).count(), 0);
    assert_eq!(verify(&candidate, &candidate).count(), 0);
}

#[test]
fn test_format_mismatch() {
    let contents = std::fs::read(fixture_path("candidate.yaml")).unwrap();
    let error =
        document_from_slice(&contents, DocumentFormat::Json).unwrap_err();
    assert!(matches!(error, LoadError::Json(_)), "{:?}", error);

    let document = document_from_slice(&contents, DocumentFormat::Yaml)
        .expect("candidate is valid YAML");
    assert_eq!(document, load_fixture("candidate.yaml"));
}
