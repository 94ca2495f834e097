// Copyright 2025 Oxide Computer Company

//! Common facilities for automated testing.

// Not every test binary uses every helper.
#![allow(dead_code)]

use camino::Utf8PathBuf;
use oas_contract::load_document;
use oas_contract::Document;
use oas_contract::Operation;
use oas_contract::Parameter;
use oas_contract::ParameterKind;
use oas_contract::ParameterType;
use oas_contract::PathItem;
use oas_contract::VerificationFailure;

/// Returns the path of a file under `tests/data`.
pub fn fixture_path(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn load_fixture(name: &str) -> Document {
    let path = fixture_path(name);
    load_document(&path)
        .unwrap_or_else(|error| panic!("loading {}: {:#?}", path, error))
}

/// Builds a document with a single `get` operation at `path`.
pub fn single_get(path: &str, parameters: Vec<Parameter>) -> Document {
    let operation = parameters
        .into_iter()
        .fold(Operation::new(), |op, p| op.with_parameter(p));
    Document::new()
        .with_path(path, PathItem::new().with_operation("get", operation))
}

pub fn query(name: &str, param_type: ParameterType) -> Parameter {
    Parameter::new(name, ParameterKind::Query).with_type(param_type)
}

/// Renders failures one per line, the way they appear in snapshot files.
pub fn render(failures: &[VerificationFailure]) -> String {
    failures.iter().map(|f| format!("{}\n", f)).collect()
}
