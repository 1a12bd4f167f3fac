pub mod diff;
pub mod message;
pub mod patch;
pub mod risk;
pub mod test_presence;

use crate::error::Result;
use crate::git::{ChangeProvider, ChangeSet};
use crate::types::analysis::FileStat;
use crate::types::config::{EvaluateConfig, RatioMode};
use crate::types::report::{Details, EvaluationResult};
use crate::types::scoring::ScoreCard;
use risk::RiskRules;
use tracing::info;

/// Knobs shared by every evaluation; weights are fixed and not part of this.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerSettings {
    pub ratio_mode: RatioMode,
    pub risk_rules: RiskRules,
}

impl AnalyzerSettings {
    pub fn from_config(config: &EvaluateConfig) -> Self {
        Self {
            ratio_mode: config.ratio_mode(),
            risk_rules: RiskRules::with_extra(
                config.extra_sensitive_files(),
                config.extra_sensitive_extensions(),
            ),
        }
    }
}

/// Runs all four analyzers over already-resolved inputs and aggregates them.
pub fn score_changes(
    message: &str,
    diff: &str,
    file_stats: &[FileStat],
    settings: &AnalyzerSettings,
) -> EvaluationResult {
    let details = Details {
        message: message::analyze(message),
        diff: diff::analyze(diff, file_stats),
        risk: risk::analyze(diff, file_stats, &settings.risk_rules),
        test: test_presence::analyze(file_stats, diff, settings.ratio_mode),
    };

    let overall = ScoreCard::new(
        details.message.score,
        details.diff.score,
        details.risk.score,
        details.test.score,
    )
    .overall();

    let result = EvaluationResult::new(overall, details);
    info!(
        overall = result.overall_score,
        status = result.status.as_str(),
        files = file_stats.len(),
        "evaluation complete"
    );
    result
}

pub struct Evaluator<P> {
    provider: P,
    settings: AnalyzerSettings,
}

impl<P: ChangeProvider> Evaluator<P> {
    pub fn new(provider: P, settings: AnalyzerSettings) -> Self {
        Self { provider, settings }
    }

    /// Scores the staged changeset. A missing message is scored as empty.
    pub fn evaluate(&self, message: Option<&str>) -> Result<EvaluationResult> {
        let ChangeSet { diff, file_stats } = self.provider.staged()?;
        Ok(score_changes(
            message.unwrap_or_default(),
            &diff,
            &file_stats,
            &self.settings,
        ))
    }

    /// Scores a historical commit against its own message.
    pub fn evaluate_commit(&self, reference: &str) -> Result<EvaluationResult> {
        let commit = self.provider.commit(reference)?;
        let mut result = score_changes(
            &commit.message,
            &commit.changes.diff,
            &commit.changes.file_stats,
            &self.settings,
        );
        result.commit = Some(commit.short_hash);
        result.commit_message = Some(commit.message);
        result.committed_at = commit.committed_at;
        Ok(result)
    }
}
