//! Interactive shell: one command per line, one analysis at a time.

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use freshlens_core::{FreshError, Record};
use freshlens_logging::{AnalysisEvent, EventLogger};
use freshlens_media::{load_image, supported_extensions};
use freshlens_report::{default_report_name, generate_pdf_report};
use freshlens_understanding::{AnalysisSession, PROMPT_TEMPLATE};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt};
use tracing::{debug, info};

use crate::config::Settings;
use crate::terminal_output::{note_error, note_info, note_success, note_warn};
use crate::views::{format_analysis, history_table, EMPTY_HISTORY};

fn help_text() -> String {
    format!(
        "\
Commands:
  analyze <image>   Analyze a produce photo ({})
  history           Show every analysis from this session
  report [path]     Export the history to a PDF report
  prompt            Show the instruction sent with each image
  help              Show this help
  quit              Leave the shell",
        supported_extensions()
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Analyze(PathBuf),
    History,
    Report(Option<PathBuf>),
    Prompt,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line. Blank lines give `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, unquote(rest.trim())),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "analyze" | "a" => {
                if rest.is_empty() {
                    return Err("usage: analyze <image>".to_string());
                }
                Self::Analyze(PathBuf::from(rest))
            }
            "history" | "h" => Self::History,
            "report" | "r" => Self::Report((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "prompt" => Self::Prompt,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(Some(command))
    }
}

/// Paths pasted from a file manager often arrive quoted.
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

pub struct Shell {
    session: AnalysisSession,
    settings: Settings,
}

impl Shell {
    pub fn new(session: AnalysisSession, settings: Settings) -> Self {
        Self { session, settings }
    }

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    /// Read commands until `quit` or end of input.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        let mut lines = input.lines();
        let mut stdout = tokio::io::stdout();

        println!("Fresh Produce Analyzer. Type 'help' for commands.");
        loop {
            stdout.write_all(b"freshlens> ").await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                println!();
                break;
            };
            match ShellCommand::parse(&line) {
                Ok(Some(command)) => {
                    if self.execute(command).await.is_break() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(usage) => note_warn(&usage),
            }
        }

        info!(session = %self.session.id(), records = self.session.ledger().len(), "Shell closed");
        Ok(())
    }

    pub async fn execute(&mut self, command: ShellCommand) -> ControlFlow<()> {
        debug!(?command, "Shell command");
        match command {
            ShellCommand::Analyze(path) => match self.analyze_path(&path).await {
                Ok(record) => print!("{}", format_analysis(&record)),
                Err(e) => note_error(&e.user_message()),
            },
            ShellCommand::History => print!("{}", history_table(self.session.ledger().snapshot())),
            ShellCommand::Report(path) => {
                if self.session.ledger().is_empty() {
                    note_info(EMPTY_HISTORY);
                }
                match self.export_report(path) {
                    Ok(written) => {
                        note_success(&format!("PDF report generated: {}", written.display()))
                    }
                    Err(e) => note_error(&e.user_message()),
                }
            }
            ShellCommand::Prompt => println!("{PROMPT_TEMPLATE}"),
            ShellCommand::Help => println!("{}", help_text()),
            ShellCommand::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Load, normalise and analyze one image. Returns a copy of the new record.
    pub async fn analyze_path(&mut self, path: &Path) -> Result<Record, FreshError> {
        let payload = load_image(path).await?;
        self.session.analyze(&payload).await.cloned()
    }

    /// Export the ledger. Without a path, a timestamped file in the report dir.
    pub fn export_report(&self, path: Option<PathBuf>) -> Result<PathBuf, FreshError> {
        let path = path.unwrap_or_else(|| {
            self.settings
                .report_dir
                .join(default_report_name(&self.settings.report_prefix, &Local::now()))
        });

        let records = self.session.ledger().snapshot();
        let outcome = generate_pdf_report(records, &path);
        let event = match &outcome {
            Ok(written) => AnalysisEvent::ReportExported {
                path: written.display().to_string(),
                rows: records.len(),
            },
            Err(e) => AnalysisEvent::ReportFailed {
                error_msg: e.to_string(),
            },
        };
        EventLogger::log_event(self.session.id(), event);
        outcome
    }
}
