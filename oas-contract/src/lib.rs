// Copyright 2025 Oxide Computer Company

//! oas-contract checks whether a candidate OpenAPI description is backward
//! compatible with a published contract.
//!
//! The contract is walked path by path, method by method, and parameter by
//! parameter.  Each way the candidate would break a client written against the
//! contract is reported as one [`VerificationFailure`]:
//!
//! * a contract path the candidate lacks ([`VerificationFailure::MissingPath`])
//! * a contract method the candidate lacks on a shared path
//!   ([`VerificationFailure::MissingHttpMethod`])
//! * a contract parameter the candidate no longer accepts
//!   ([`VerificationFailure::MissingParameter`])
//! * a parameter the candidate adds and requires
//!   ([`VerificationFailure::ExcessRequiredParameter`])
//! * a parameter whose type, required flag, or bounds changed
//!   ([`VerificationFailure::IncompatibleParameter`])
//!
//! Anything the candidate merely adds (paths, methods, optional parameters) is
//! compatible and never reported.
//!
//! ## Usage
//!
//! Documents are usually loaded from OpenAPI files:
//!
//! ```no_run
//! use camino::Utf8Path;
//! use oas_contract::load_document;
//! use oas_contract::verify;
//!
//! fn check() -> Result<bool, oas_contract::LoadError> {
//!     let contract = load_document(Utf8Path::new("openapi/v1.json"))?;
//!     let candidate = load_document(Utf8Path::new("openapi/v2.yaml"))?;
//!
//!     let mut compatible = true;
//!     for failure in verify(&candidate, &contract) {
//!         eprintln!("{}", failure);
//!         compatible = false;
//!     }
//!     Ok(compatible)
//! }
//! ```
//!
//! They can also be built in code, which is how most tests construct them:
//!
//! ```
//! use oas_contract::Document;
//! use oas_contract::Operation;
//! use oas_contract::Parameter;
//! use oas_contract::ParameterKind;
//! use oas_contract::ParameterType;
//! use oas_contract::PathItem;
//! use oas_contract::VerificationFailure;
//!
//! let contract = Document::new().with_path(
//!     "/api/items",
//!     PathItem::new().with_operation(
//!         "get",
//!         Operation::new().with_parameter(
//!             Parameter::new("limit", ParameterKind::Query)
//!                 .with_type(ParameterType::Integer),
//!         ),
//!     ),
//! );
//! let candidate = Document::new().with_path(
//!     "/api/items",
//!     PathItem::new().with_operation("get", Operation::new()),
//! );
//!
//! let failures: Vec<_> =
//!     oas_contract::verify(&candidate, &contract).collect();
//! assert_eq!(
//!     failures,
//!     vec![VerificationFailure::MissingParameter {
//!         path: "/api/items".to_string(),
//!         method: "get".to_string(),
//!         parameter_name: "limit".to_string(),
//!         parameter_kind: ParameterKind::Query,
//!     }]
//! );
//! ```
//!
//! ## Logging and configuration
//!
//! [`Verifier`] does the same work as [`verify`] but logs what it finds to a
//! [`slog::Logger`] and can be configured with a [`ConstraintPolicy`] other
//! than exact matching.  [`ConfigVerifier`] and [`ConfigLogging`] can be
//! embedded in a consumer's own TOML configuration.

mod config;
mod constraints;
mod error;
mod failure;
mod load;
mod logging;
mod model;
mod openapi;
mod verifier;

pub mod test_util;

#[macro_use]
extern crate slog;

pub use config::ConfigVerifier;
pub use constraints::ConstraintPolicy;
pub use constraints::ParameterConstraints;
pub use error::ImportError;
pub use error::LoadError;
pub use failure::VerificationFailure;
pub use load::document_from_slice;
pub use load::load_document;
pub use load::parse_openapi;
pub use load::DocumentFormat;
pub use logging::ConfigLogging;
pub use logging::ConfigLoggingIfExists;
pub use logging::ConfigLoggingLevel;
pub use model::Document;
pub use model::Operation;
pub use model::Parameter;
pub use model::ParameterKind;
pub use model::ParameterType;
pub use model::PathItem;
pub use verifier::verify;
pub use verifier::Verifier;
