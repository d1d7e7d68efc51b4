//! freshlens configuration schema.
//!
//! Every field is optional on disk; `defaults::apply_all_defaults` fills the
//! gaps after loading.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreshLensConfig {
    /// Hosted vision model connection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision: Option<VisionConfig>,

    /// PDF report output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

// ---------------------------------------------------------------------------
// Vision
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionConfig {
    /// "vertex" | "gemini"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Cloud project identifier (vertex only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Cloud region (vertex only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Model identifier, e.g. "gemini-1.5-flash-002"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Vertex: a service-account key (path to the key file or the inline JSON)
    /// or an OAuth access token. Gemini: an API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    /// Directory reports are written to when no explicit path is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    /// File name prefix; a `_%Y%m%d_%H%M%S.pdf` suffix is appended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name_prefix: Option<String>,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Directory for the rolling NDJSON log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl FreshLensConfig {
    /// Vision section, or an empty one.
    pub fn vision(&self) -> VisionConfig {
        self.vision.clone().unwrap_or_default()
    }

    pub fn report(&self) -> ReportConfig {
        self.report.clone().unwrap_or_default()
    }

    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = r#"
vision:
  provider: vertex
  project: my-project
  model: gemini-1.5-flash-002
report:
  outputDir: ./reports
"#;
        let cfg: FreshLensConfig = serde_yaml::from_str(yaml).unwrap();
        let vision = cfg.vision();
        assert_eq!(vision.project.as_deref(), Some("my-project"));
        assert_eq!(vision.model.as_deref(), Some("gemini-1.5-flash-002"));
        assert_eq!(cfg.report().output_dir.as_deref(), Some("./reports"));
        assert!(cfg.logging.is_none());
    }

    #[test]
    fn sampling_keys_are_not_configurable() {
        let yaml = r#"
vision:
  model: gemini-1.5-flash-002
  temperature: 1.7
  topK: 1
  maxOutputTokens: 8
"#;
        let cfg: FreshLensConfig = serde_yaml::from_str(yaml).unwrap();
        let round_trip = serde_yaml::to_string(&cfg).unwrap();
        assert!(round_trip.contains("gemini-1.5-flash-002"));
        assert!(!round_trip.contains("temperature"));
        assert!(!round_trip.contains("topK"));
        assert!(!round_trip.contains("maxOutputTokens"));
    }

    #[test]
    fn empty_sections_are_not_serialized() {
        let yaml = serde_yaml::to_string(&FreshLensConfig::default()).unwrap();
        assert!(!yaml.contains("vision"));
    }
}
