// Copyright 2025 Oxide Computer Company

//! Reading OpenAPI documents from files or memory

use crate::error::LoadError;
use crate::model::Document;
use camino::Utf8Path;
use openapiv3::OpenAPI;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serialization format of an OpenAPI document
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Infer the format from a file name: `.yaml` and `.yml` are YAML and
    /// everything else is assumed to be JSON.
    pub fn from_path(path: &Utf8Path) -> DocumentFormat {
        match path.extension().map(|e| e.to_ascii_lowercase()).as_deref() {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "JSON"),
            DocumentFormat::Yaml => write!(f, "YAML"),
        }
    }
}

/// Parse an OpenAPI document without projecting it onto the model.
pub fn parse_openapi(
    contents: &[u8],
    format: DocumentFormat,
) -> Result<OpenAPI, LoadError> {
    Ok(match format {
        DocumentFormat::Json => serde_json::from_slice(contents)?,
        DocumentFormat::Yaml => serde_yaml::from_slice(contents)?,
    })
}

/// Parse an OpenAPI document from memory and import it.
pub fn document_from_slice(
    contents: &[u8],
    format: DocumentFormat,
) -> Result<Document, LoadError> {
    let openapi = parse_openapi(contents, format)?;
    Ok(Document::try_from(&openapi)?)
}

/// Read, parse, and import the OpenAPI document at `path`, inferring its format
/// from the file name.
pub fn load_document(path: &Utf8Path) -> Result<Document, LoadError> {
    let contents = fs_err::read(path)?;
    document_from_slice(&contents, DocumentFormat::from_path(path))
}
