//! CLI Doctor Command
//!
//! Shows the effective configuration with credentials masked, then the
//! validation report.

use std::path::Path;

use anyhow::Result;
use freshlens_config::{redact, validate, FreshLensConfig};

use crate::terminal_output::{note_error, note_success, note_warn};

/// Executes the full doctor diagnosis. Returns whether the config is usable.
pub fn run(config: &FreshLensConfig, config_path: &Path) -> Result<bool> {
    println!("\nRunning freshlens doctor...\n");

    let source = if config_path.exists() { "" } else { " (not found, using environment and defaults)" };
    println!("Config file: {}{source}\n", config_path.display());

    let shown = redact(&serde_json::to_value(config)?);
    println!("{}\n", serde_json::to_string_pretty(&shown)?);

    let report = validate(config);
    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }

    println!();
    if report.is_valid() {
        note_success("Configuration is complete. The shell can start.");
    } else {
        note_error("Configuration is incomplete. Fix the errors above.");
    }
    Ok(report.is_valid())
}
