// Copyright 2025 Oxide Computer Company

//! Configuration for the verifier

use crate::constraints::ConstraintPolicy;
use serde::Deserialize;
use serde::Serialize;

/// Configuration for a [`crate::Verifier`].
///
/// This type implements [`serde::Deserialize`] and [`serde::Serialize`] and it
/// can be composed with the consumer's configuration (whatever format that's
/// in).  For example:
///
/// ```
/// use oas_contract::ConfigVerifier;
/// use oas_contract::ConstraintPolicy;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct MyAppConfig {
///     verifier: ConfigVerifier,
///     /* ... (other app-specific config) */
/// }
///
/// fn main() -> Result<(), String> {
///     let my_config: MyAppConfig = toml::from_str(
///         r##"
///             [verifier]
///             constraint_policy = "allow-relaxation"
///         "##
///     ).map_err(|error| format!("parsing config: {}", error))?;
///
///     assert_eq!(
///         my_config.verifier.constraint_policy,
///         ConstraintPolicy::AllowRelaxation
///     );
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ConfigVerifier {
    /// how parameter constraints are compared, defaults to "exact"
    pub constraint_policy: ConstraintPolicy,
}
