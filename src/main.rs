mod analyze;
mod cli;
mod config;
mod error;
mod git;
mod report;
mod types;

use crate::analyze::{AnalyzerSettings, Evaluator};
use crate::error::EvaluateError;
use crate::git::GitRepo;
use crate::types::config::{OutputFormatConfig, RatioMode};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const CRITICAL: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .init();
}

fn output_format(cmd: &cli::Cli, configured: Option<OutputFormatConfig>) -> report::OutputFormat {
    if cmd.json {
        return report::OutputFormat::Json;
    }
    match (cmd.format, configured) {
        (Some(cli::ReportFormat::Text), _) => report::OutputFormat::Text,
        (Some(cli::ReportFormat::Json), _) => report::OutputFormat::Json,
        (Some(cli::ReportFormat::Sarif), _) => report::OutputFormat::Sarif,
        (None, Some(OutputFormatConfig::Json)) => report::OutputFormat::Json,
        (None, Some(OutputFormatConfig::Sarif)) => report::OutputFormat::Sarif,
        (None, Some(OutputFormatConfig::Text) | None) => report::OutputFormat::Text,
    }
}

fn run() -> Result<i32, EvaluateError> {
    let cmd = cli::Cli::parse();
    init_logging(cmd.verbose, cmd.quiet);
    debug!(version = env!("CARGO_PKG_VERSION"), "git-evaluate starting");

    let repo = GitRepo::discover(&cmd.repo)?;
    let loaded = config::load_config(repo.root())?;

    let mut settings = AnalyzerSettings::from_config(&loaded);
    if let Some(mode) = cmd.ratio_mode {
        settings.ratio_mode = match mode {
            cli::RatioModeArg::Lines => RatioMode::Lines,
            cli::RatioModeArg::Files => RatioMode::Files,
        };
    }

    let format = output_format(&cmd, loaded.output_format());
    let evaluator = Evaluator::new(repo, settings);
    let result = match &cmd.commit {
        Some(reference) => evaluator.evaluate_commit(reference)?,
        None => evaluator.evaluate(cmd.message.as_deref())?,
    };

    let rendered = report::render(&result, format)?;
    println!("{rendered}");
    Ok(result.exit_code)
}

fn main() {
    match run() {
        Ok(code) => {
            if code != exit_code::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
