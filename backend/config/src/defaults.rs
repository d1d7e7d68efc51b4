//! Config defaults: applies default values to parsed config.

use crate::schema::{FreshLensConfig, LoggingConfig, ReportConfig, VisionConfig};

pub const DEFAULT_PROVIDER: &str = "vertex";
pub const DEFAULT_LOCATION: &str = "us-central1";
pub const DEFAULT_REPORT_DIR: &str = ".";
pub const DEFAULT_REPORT_PREFIX: &str = "produce_analysis_report";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: FreshLensConfig) -> FreshLensConfig {
    let config = apply_vision_defaults(config);
    let config = apply_report_defaults(config);
    apply_logging_defaults(config)
}

fn apply_vision_defaults(mut config: FreshLensConfig) -> FreshLensConfig {
    let vision = config.vision.get_or_insert_with(VisionConfig::default);
    vision.provider.get_or_insert_with(|| DEFAULT_PROVIDER.to_string());
    vision.location.get_or_insert_with(|| DEFAULT_LOCATION.to_string());
    config
}

fn apply_report_defaults(mut config: FreshLensConfig) -> FreshLensConfig {
    let report = config.report.get_or_insert_with(ReportConfig::default);
    report.output_dir.get_or_insert_with(|| DEFAULT_REPORT_DIR.to_string());
    report.file_name_prefix.get_or_insert_with(|| DEFAULT_REPORT_PREFIX.to_string());
    config
}

/// The log directory default depends on the config dir, so it is resolved
/// by the caller; only the level is defaulted here.
fn apply_logging_defaults(mut config: FreshLensConfig) -> FreshLensConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    config
}
