use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "git-evaluate",
    version,
    about = "Evaluate staged git changes or a past commit before it lands",
    after_help = "Exit codes:\n  0 - excellent/good (score >= 60)\n  1 - warning/poor (20 <= score < 60)\n  2 - critical (score < 20)\n  3 - runtime error (not a repository, bad commit reference, bad config)"
)]
pub struct Cli {
    /// Commit message to evaluate against the staged changes
    #[arg(short, long, conflicts_with = "commit")]
    pub message: Option<String>,

    /// Evaluate a specific commit from history (e.g. HEAD~1, abc123)
    #[arg(short, long)]
    pub commit: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    pub json: bool,

    /// Path to the git repository
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// How the test analyzer compares tests to implementation
    #[arg(long, value_enum)]
    pub ratio_mode: Option<RatioModeArg>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    Sarif,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RatioModeArg {
    Lines,
    Files,
}
