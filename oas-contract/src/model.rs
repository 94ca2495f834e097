// Copyright 2025 Oxide Computer Company

//! In-memory model of the parts of an API description that matter for
//! compatibility checking
//!
//! A [`Document`] maps URL paths to [`PathItem`]s, each of which maps HTTP
//! method names to [`Operation`]s.  Operations carry an ordered list of
//! [`Parameter`]s.  Everything here is plain data: the verifier only ever
//! borrows it.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// An API description: an ordered mapping from path to [`PathItem`]
///
/// Iteration order is insertion order.  For a contract document, that order
/// determines the order in which failures are reported.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub paths: IndexMap<String, PathItem>,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    /// Adds (or replaces) the item for `path`
    pub fn with_path<S: Into<String>>(
        mut self,
        path: S,
        item: PathItem,
    ) -> Document {
        self.paths.insert(path.into(), item);
        self
    }

    pub fn path(&self, path: &str) -> Option<&PathItem> {
        self.paths.get(path)
    }

    pub fn iter_paths(
        &self,
    ) -> impl Iterator<Item = (&'_ str, &'_ PathItem)> + '_ {
        self.paths.iter().map(|(path, item)| (path.as_str(), item))
    }
}

/// The operations available at one path, keyed by HTTP method
///
/// Method names are kept exactly as supplied.  Lookups are case-sensitive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathItem {
    pub operations: IndexMap<String, Operation>,
}

impl PathItem {
    pub fn new() -> PathItem {
        PathItem::default()
    }

    pub fn with_operation<S: Into<String>>(
        mut self,
        method: S,
        operation: Operation,
    ) -> PathItem {
        self.operations.insert(method.into(), operation);
        self
    }

    pub fn operation(&self, method: &str) -> Option<&Operation> {
        self.operations.get(method)
    }

    pub fn iter_operations(
        &self,
    ) -> impl Iterator<Item = (&'_ str, &'_ Operation)> + '_ {
        self.operations.iter().map(|(method, op)| (method.as_str(), op))
    }
}

/// A single HTTP operation
///
/// The same `(name, kind)` pair is not expected to appear twice, but nothing
/// here prevents it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub parameters: Vec<Parameter>,
}

impl Operation {
    pub fn new() -> Operation {
        Operation::default()
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Operation {
        self.parameters.push(parameter);
        self
    }

    pub fn iter_parameters(&self) -> impl Iterator<Item = &'_ Parameter> + '_ {
        self.parameters.iter()
    }
}

/// A named request parameter together with its type constraints
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub kind: ParameterKind,
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    pub required: bool,
    /// inclusive upper bound for numeric values
    pub maximum: Option<Decimal>,
    /// upper bound on the number of array items; 0 means "no bound"
    pub max_items: usize,
    /// upper bound on the length of string values
    pub max_length: Option<usize>,
}

impl Parameter {
    /// Returns an optional parameter with no declared type and no bounds.
    pub fn new<S: Into<String>>(name: S, kind: ParameterKind) -> Parameter {
        Parameter {
            name: name.into(),
            kind,
            param_type: ParameterType::Unspecified,
            required: false,
            maximum: None,
            max_items: 0,
            max_length: None,
        }
    }

    pub fn with_type(mut self, param_type: ParameterType) -> Parameter {
        self.param_type = param_type;
        self
    }

    pub fn with_required(mut self, required: bool) -> Parameter {
        self.required = required;
        self
    }

    pub fn with_maximum<D: Into<Decimal>>(mut self, maximum: D) -> Parameter {
        self.maximum = Some(maximum.into());
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Parameter {
        self.max_items = max_items;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Parameter {
        self.max_length = Some(max_length);
        self
    }
}

/// Where in an HTTP request a parameter appears
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    Query,
    Header,
    Path,
    Cookie,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParameterKind::Query => "query",
            ParameterKind::Header => "header",
            ParameterKind::Path => "path",
            ParameterKind::Cookie => "cookie",
        })
    }
}

/// The declared type of a parameter's value
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    /// No single type was declared (e.g., a composed schema)
    #[default]
    Unspecified,
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    File,
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParameterType::Unspecified => "unspecified",
            ParameterType::String => "string",
            ParameterType::Integer => "integer",
            ParameterType::Number => "number",
            ParameterType::Boolean => "boolean",
            ParameterType::Array => "array",
            ParameterType::Object => "object",
            ParameterType::File => "file",
        })
    }
}
