//! `freshlens-config`: runtime configuration for freshlens.
//!
//! Provides:
//! - Typed config schema (vision connection, report output, logging)
//! - YAML read/write
//! - `${ENV_VAR}` substitution and fixed environment overrides
//! - Default values and validation
//! - Redaction for safe display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use redact::redact;
pub use schema::{FreshLensConfig, LoggingConfig, ReportConfig, VisionConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Load, substitute env vars, overlay environment overrides, and apply defaults.
///
/// Validation is left to the caller, which decides whether errors are fatal.
pub async fn load_and_prepare(path: &Path) -> Result<FreshLensConfig> {
    let env: HashMap<String, String> = std::env::vars().collect();
    prepare(load_config(path).await?, &env)
}

/// The in-memory part of [`load_and_prepare`].
pub fn prepare(raw: FreshLensConfig, env: &HashMap<String, String>) -> Result<FreshLensConfig> {
    let value: Value =
        serde_json::to_value(&raw).context("Failed to serialize config for processing")?;
    let value = resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;
    let config: FreshLensConfig = serde_json::from_value(value)
        .context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides(config, env);
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_combines_file_env_and_defaults() {
        let raw: FreshLensConfig = serde_yaml::from_str(
            "vision:\n  credential: \"${TOKEN_FROM_ENV}\"\n",
        )
        .unwrap();
        let env: HashMap<String, String> = [
            ("TOKEN_FROM_ENV", "ya29.secret"),
            ("GOOGLE_CLOUD_PROJECT", "orchard"),
            ("GCP_MODEL_CRED", "gemini-1.5-flash-002"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let cfg = prepare(raw, &env).unwrap();
        let vision = cfg.vision();
        assert_eq!(vision.credential.as_deref(), Some("ya29.secret"));
        assert_eq!(vision.project.as_deref(), Some("orchard"));
        assert_eq!(vision.location.as_deref(), Some("us-central1"));
        assert!(validate(&cfg).is_valid());
    }
}
