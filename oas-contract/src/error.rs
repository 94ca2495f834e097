// Copyright 2025 Oxide Computer Company

//! Errors from acquiring documents to verify
//!
//! Verification itself cannot fail.  What it finds is reported as
//! [`crate::VerificationFailure`] values, which are the normal output of a
//! run.  The errors here describe problems turning a file into a
//! [`crate::Document`] in the first place.

use thiserror::Error;

/// Problems projecting an OpenAPI document onto the model
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(
        "unsupported reference {reference:?} (only references to local \
         components are resolved)"
    )]
    UnsupportedReference { reference: String },

    #[error("reference {reference:?} does not refer to any component")]
    UnresolvedReference { reference: String },

    #[error(
        "reference {reference:?} could not be resolved within {depth} steps"
    )]
    ReferenceTooDeep { reference: String, depth: usize },

    #[error(
        "{method} {path}: parameter {parameter:?} has a maximum ({value}) \
         outside the supported decimal range"
    )]
    InvalidMaximum {
        path: String,
        method: String,
        parameter: String,
        value: f64,
    },
}

/// Problems reading and parsing a document
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("document is not valid OpenAPI (JSON)")]
    Json(#[from] serde_json::Error),

    #[error("document is not valid OpenAPI (YAML)")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to import OpenAPI document")]
    Import(#[from] ImportError),
}
