mod config;
mod doctor_cmd;
mod init_cmd;
mod shell;
mod terminal_output;
mod views;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::info;

use freshlens_config::{config_dir, config_file_path, load_and_prepare};
use freshlens_understanding::{AnalysisSession, PROMPT_TEMPLATE};

use config::{connect, Settings};
use shell::{Shell, ShellCommand};
use terminal_output::note_error;

#[derive(Parser)]
#[command(name = "freshlens")]
#[command(about = "Fresh Produce Analyzer: photo in, freshness report out")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.freshlens/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level, e.g. "debug" or "freshlens_understanding=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell,
    /// Analyze images one after another, optionally exporting a report
    Analyze {
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Write a PDF report of the batch to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Show the effective configuration and what is missing
    Doctor,
    /// Print the instruction sent with each image
    Prompt,
    /// Write a starter config file
    Init {
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let command = cli.command.unwrap_or(Commands::Shell);

    match command {
        Commands::Prompt => {
            println!("{PROMPT_TEMPLATE}");
            return Ok(());
        }
        Commands::Init { force } => return init_cmd::run(&config_path, force).await,
        _ => {}
    }

    let config = load_and_prepare(&config_path).await?;
    let settings = Settings::resolve(&config, cli.log_level.as_deref());
    freshlens_logging::init_logger(&settings.log_dir, &settings.log_level);
    info!(config = %config_path.display(), "Configuration loaded");

    if let Commands::Doctor = command {
        if !doctor_cmd::run(&config, &config_path)? {
            std::process::exit(1);
        }
        return Ok(());
    }

    let model = match connect(&config) {
        Ok(model) => model,
        Err(e) => {
            note_error(&format!("Error loading Google Cloud credentials: {e}"));
            note_error("Run 'freshlens doctor' to see what is missing.");
            return Err(e.into());
        }
    };
    info!(provider = model.name(), model = model.model(), "Vision model ready");

    let session = AnalysisSession::new(model);
    let mut shell = Shell::new(session, settings);

    match command {
        Commands::Analyze { images, report } => {
            for image in images {
                println!("\n{}", image.display());
                let _ = shell.execute(ShellCommand::Analyze(image)).await;
            }
            if let Some(path) = report {
                let _ = shell.execute(ShellCommand::Report(Some(path))).await;
            }
            if shell.session().ledger().is_empty() {
                bail!("no image was analyzed");
            }
        }
        _ => shell.run(BufReader::new(tokio::io::stdin())).await?,
    }

    Ok(())
}
