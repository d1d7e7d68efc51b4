//! `freshlens init`: write a starter config file.

use std::path::Path;

use anyhow::{bail, Result};
use freshlens_config::defaults::{
    DEFAULT_LOCATION, DEFAULT_PROVIDER, DEFAULT_REPORT_DIR, DEFAULT_REPORT_PREFIX,
};
use freshlens_config::{write_config, FreshLensConfig, ReportConfig, VisionConfig};

use crate::terminal_output::{note_info, note_success};

/// The starter config. Project, credential and model are left to the
/// environment so no secret ends up on disk.
pub fn starter_config() -> FreshLensConfig {
    FreshLensConfig {
        vision: Some(VisionConfig {
            provider: Some(DEFAULT_PROVIDER.into()),
            location: Some(DEFAULT_LOCATION.into()),
            ..Default::default()
        }),
        report: Some(ReportConfig {
            output_dir: Some(DEFAULT_REPORT_DIR.into()),
            file_name_prefix: Some(DEFAULT_REPORT_PREFIX.into()),
        }),
        logging: None,
    }
}

pub async fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_config(&starter_config(), path).await?;
    note_success(&format!("Wrote {}", path.display()));
    note_info("Set GOOGLE_CLOUD_PROJECT, GOOGLE_APPLICATION_CREDENTIALS and GCP_MODEL_CRED, then run 'freshlens doctor'.");
    Ok(())
}
