//! `${VAR}` substitution in config string values, plus the fixed set of
//! environment overrides the tool honours.
//!
//! Only uppercase `[A-Z_][A-Z0-9_]*` names are substituted. `$${VAR}` escapes
//! to a literal `${VAR}`.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::{FreshLensConfig, LoggingConfig, ReportConfig, VisionConfig};

/// Matches `${VAR}` and the escaped form `$${VAR}`.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Cloud project identifier.
pub const ENV_PROJECT: &str = "GOOGLE_CLOUD_PROJECT";
/// Vertex: service-account key (file path or inline JSON) or OAuth access
/// token. Gemini: API key.
pub const ENV_CREDENTIAL: &str = "GOOGLE_APPLICATION_CREDENTIALS";
/// Model identifier.
pub const ENV_MODEL: &str = "GCP_MODEL_CRED";
pub const ENV_LOCATION: &str = "FRESHLENS_LOCATION";
pub const ENV_PROVIDER: &str = "FRESHLENS_PROVIDER";
pub const ENV_REPORT_DIR: &str = "FRESHLENS_REPORT_DIR";
pub const ENV_LOG_DIR: &str = "FRESHLENS_LOG_DIR";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references using the process environment.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &std::env::vars().collect())
}

/// Substitute `${VAR}` references using a provided map.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let substituted = ENV_VAR_PATTERN.replace_all(s, |caps: &Captures| {
        let name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

/// Overlay the fixed environment overrides onto a loaded config.
///
/// Empty values are ignored.
pub fn apply_env_overrides(mut config: FreshLensConfig, env: &HashMap<String, String>) -> FreshLensConfig {
    let get = |name: &str| env.get(name).filter(|v| !v.trim().is_empty()).cloned();

    let vision = config.vision.get_or_insert_with(VisionConfig::default);
    if let Some(v) = get(ENV_PROVIDER) {
        vision.provider = Some(v);
    }
    if let Some(v) = get(ENV_PROJECT) {
        vision.project = Some(v);
    }
    if let Some(v) = get(ENV_LOCATION) {
        vision.location = Some(v);
    }
    if let Some(v) = get(ENV_MODEL) {
        vision.model = Some(v);
    }
    if let Some(v) = get(ENV_CREDENTIAL) {
        vision.credential = Some(v);
    }

    if let Some(v) = get(ENV_REPORT_DIR) {
        config.report.get_or_insert_with(ReportConfig::default).output_dir = Some(v);
    }
    if let Some(v) = get(ENV_LOG_DIR) {
        config.logging.get_or_insert_with(LoggingConfig::default).dir = Some(v);
    }
    config
}
