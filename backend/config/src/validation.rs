//! Config validation with user-facing error messages.

use crate::schema::FreshLensConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All validation errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
///
/// Credentials are only checked for presence; whether they work is decided
/// by the first model call.
pub fn validate(config: &FreshLensConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_vision(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).map(str::is_empty).unwrap_or(true)
}

fn validate_vision(config: &FreshLensConfig, report: &mut ValidationReport) {
    let vision = config.vision();
    let provider = vision.provider.as_deref().unwrap_or("vertex");

    match provider {
        "vertex" => {
            if is_blank(&vision.project) {
                report.error("vision.project", "Cloud project is required (GOOGLE_CLOUD_PROJECT)");
            }
            if is_blank(&vision.location) {
                report.error("vision.location", "Location cannot be empty");
            }
        }
        "gemini" => {
            if !is_blank(&vision.project) {
                report.warn("vision.project", "Project is ignored by the gemini provider");
            }
        }
        other => {
            report.error(
                "vision.provider",
                format!("Unknown provider '{other}'. Use 'vertex' or 'gemini'"),
            );
        }
    }

    if is_blank(&vision.credential) {
        report.error(
            "vision.credential",
            "Credential is required (GOOGLE_APPLICATION_CREDENTIALS)",
        );
    }
    if is_blank(&vision.model) {
        report.error("vision.model", "Model identifier is required (GCP_MODEL_CRED)");
    }
}

fn validate_logging(config: &FreshLensConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging().level else { return };
    if !matches!(
        level.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    ) && !level.contains('=')
    {
        report.warn("logging.level", format!("Unrecognised log level '{level}'"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::VisionConfig;

    fn vertex() -> VisionConfig {
        VisionConfig {
            provider: Some("vertex".into()),
            project: Some("orchard".into()),
            location: Some("us-central1".into()),
            model: Some("gemini-1.5-flash-002".into()),
            credential: Some("ya29.token".into()),
            ..Default::default()
        }
    }

    #[test]
    fn complete_vertex_config_is_valid() {
        let cfg = FreshLensConfig {
            vision: Some(vertex()),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert!(report.is_valid(), "errors: {:?}", report.errors);
    }

    #[test]
    fn empty_config_reports_missing_connection_values() {
        let report = validate(&FreshLensConfig::default());
        let paths: Vec<&str> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"vision.project"));
        assert!(paths.contains(&"vision.credential"));
        assert!(paths.contains(&"vision.model"));
    }

    #[test]
    fn gemini_does_not_need_project() {
        let cfg = FreshLensConfig {
            vision: Some(VisionConfig {
                provider: Some("gemini".into()),
                project: None,
                ..vertex()
            }),
            ..Default::default()
        };
        assert!(validate(&cfg).is_valid());
    }

    #[test]
    fn unknown_provider_is_an_error() {
        let cfg = FreshLensConfig {
            vision: Some(VisionConfig {
                provider: Some("openai".into()),
                ..vertex()
            }),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "vision.provider");
    }
}
