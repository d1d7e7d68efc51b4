//! Runtime settings resolved from the loaded config, and the model client
//! built from its vision section.

use std::path::PathBuf;
use std::sync::Arc;

use freshlens_config::defaults::{
    DEFAULT_LOCATION, DEFAULT_LOG_LEVEL, DEFAULT_PROVIDER, DEFAULT_REPORT_DIR,
    DEFAULT_REPORT_PREFIX,
};
use freshlens_config::{config_dir, validate, FreshLensConfig};
use freshlens_core::{FreshError, VisionModel};
use freshlens_understanding::{GeminiProvider, VertexAuth, VertexProvider};

/// Everything the shell needs besides the model client.
#[derive(Debug, Clone)]
pub struct Settings {
    pub log_level: String,
    pub log_dir: PathBuf,
    pub report_dir: PathBuf,
    pub report_prefix: String,
}

impl Settings {
    /// `log_level` comes from `--log-level` and beats the config file.
    pub fn resolve(config: &FreshLensConfig, log_level: Option<&str>) -> Self {
        let logging = config.logging();
        let report = config.report();

        Self {
            log_level: log_level
                .map(str::to_string)
                .or(logging.level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_dir: logging
                .dir
                .map(PathBuf::from)
                .unwrap_or_else(|| config_dir().join("logs")),
            report_dir: PathBuf::from(
                report.output_dir.unwrap_or_else(|| DEFAULT_REPORT_DIR.to_string()),
            ),
            report_prefix: report
                .file_name_prefix
                .unwrap_or_else(|| DEFAULT_REPORT_PREFIX.to_string()),
        }
    }
}

/// Build the model client, refusing to start on an invalid config.
pub fn connect(config: &FreshLensConfig) -> Result<Arc<dyn VisionModel>, FreshError> {
    let report = validate(config);
    if !report.is_valid() {
        let problems: Vec<String> = report
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect();
        return Err(FreshError::Config(problems.join("; ")));
    }

    let vision = config.vision();
    let model = required(&vision.model, "vision.model")?;
    let credential = required(&vision.credential, "vision.credential")?;

    match vision.provider.as_deref().unwrap_or(DEFAULT_PROVIDER) {
        "vertex" => {
            let project = required(&vision.project, "vision.project")?;
            let location = vision.location.as_deref().unwrap_or(DEFAULT_LOCATION);
            let auth = VertexAuth::from_credential(credential)
                .map_err(|e| FreshError::Config(format!("vision.credential: {e:#}")))?;
            Ok(Arc::new(VertexProvider::new(project, location, model, auth)))
        }
        "gemini" => Ok(Arc::new(GeminiProvider::new(credential, model))),
        other => Err(FreshError::Config(format!("unknown vision provider '{other}'"))),
    }
}

fn required<'a>(value: &'a Option<String>, path: &str) -> Result<&'a str, FreshError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| FreshError::Config(format!("{path} is required")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use freshlens_config::{LoggingConfig, ReportConfig, VisionConfig};

    fn vision(provider: &str) -> VisionConfig {
        VisionConfig {
            provider: Some(provider.into()),
            project: Some("orchard-42".into()),
            location: Some("europe-west4".into()),
            model: Some("gemini-1.5-flash-002".into()),
            credential: Some("ya29.token".into()),
            ..Default::default()
        }
    }

    #[test]
    fn connects_to_vertex() {
        let config = FreshLensConfig {
            vision: Some(vision("vertex")),
            ..Default::default()
        };
        let model = connect(&config).unwrap();
        assert_eq!(model.name(), "vertex");
        assert_eq!(model.model(), "gemini-1.5-flash-002");
    }

    #[test]
    fn connects_to_gemini_without_project() {
        let mut v = vision("gemini");
        v.project = None;
        let config = FreshLensConfig {
            vision: Some(v),
            ..Default::default()
        };
        assert_eq!(connect(&config).unwrap().name(), "gemini");
    }

    #[test]
    fn missing_credential_is_terminal() {
        let mut v = vision("vertex");
        v.credential = None;
        let config = FreshLensConfig {
            vision: Some(v),
            ..Default::default()
        };
        let err = connect(&config).err().unwrap();
        assert!(matches!(err, FreshError::Config(ref m) if m.contains("vision.credential")));
    }

    #[test]
    fn missing_service_account_file_is_terminal() {
        let mut v = vision("vertex");
        v.credential = Some("/no/such/dir/service-account.json".into());
        let config = FreshLensConfig {
            vision: Some(v),
            ..Default::default()
        };
        let err = connect(&config).err().unwrap();
        assert!(matches!(err, FreshError::Config(ref m) if m.contains("not found")));
    }

    #[test]
    fn resolve_prefers_flag_over_file() {
        let config = FreshLensConfig {
            report: Some(ReportConfig {
                output_dir: Some("/tmp/reports".into()),
                file_name_prefix: None,
            }),
            logging: Some(LoggingConfig {
                level: Some("warn".into()),
                dir: Some("/tmp/logs".into()),
            }),
            ..Default::default()
        };
        let settings = Settings::resolve(&config, Some("debug"));
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.log_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(settings.report_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(settings.report_prefix, "produce_analysis_report");
    }
}
