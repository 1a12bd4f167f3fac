use crate::exit_code;
use crate::types::analysis::{AnalysisResult, Score, MAX_SCORE};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Excellent,
    Good,
    Warning,
    Poor,
    Critical,
}

impl Status {
    /// Bands an overall score; lower bounds are inclusive and checked top-down.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 40.0 {
            Self::Warning
        } else if score >= 20.0 {
            Self::Poor
        } else {
            Self::Critical
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Self::Excellent | Self::Good => exit_code::SUCCESS,
            Self::Warning | Self::Poor => exit_code::WARNINGS,
            Self::Critical => exit_code::CRITICAL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Poor => "poor",
            Self::Critical => "critical",
        }
    }
}

/// Per-analyzer results, serialized in the fixed analyzer order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Details {
    pub message: AnalysisResult,
    pub diff: AnalysisResult,
    pub risk: AnalysisResult,
    pub test: AnalysisResult,
}

impl Details {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &AnalysisResult)> {
        [
            ("message", &self.message),
            ("diff", &self.diff),
            ("risk", &self.risk),
            ("test", &self.test),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Summary {
    pub fn from_details(details: &Details) -> Self {
        let mut summary = Self::default();
        for (name, result) in details.iter() {
            let prefix = |text: &String| format!("[{name}] {text}");
            summary.issues.extend(result.issues.iter().map(prefix));
            summary.warnings.extend(result.warnings.iter().map(prefix));
            summary.suggestions.extend(result.suggestions.iter().map(prefix));
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub overall_score: f64,
    pub max_score: Score,
    pub status: Status,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed_at: Option<DateTime<Utc>>,
    pub details: Details,
    pub summary: Summary,
}

impl EvaluationResult {
    pub fn new(overall_score: f64, details: Details) -> Self {
        let status = Status::from_score(overall_score);
        let summary = Summary::from_details(&details);
        Self {
            overall_score,
            max_score: MAX_SCORE,
            status,
            exit_code: status.exit_code(),
            commit: None,
            commit_message: None,
            committed_at: None,
            details,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bands_use_inclusive_lower_bounds() {
        let cases = [
            (100.0, Status::Excellent, 0),
            (80.0, Status::Excellent, 0),
            (79.99, Status::Good, 0),
            (60.0, Status::Good, 0),
            (59.99, Status::Warning, 1),
            (40.0, Status::Warning, 1),
            (39.99, Status::Poor, 1),
            (20.0, Status::Poor, 1),
            (19.99, Status::Critical, 2),
            (0.0, Status::Critical, 2),
        ];
        for (score, status, code) in cases {
            assert_eq!(Status::from_score(score), status, "score {score}");
            assert_eq!(Status::from_score(score).exit_code(), code, "score {score}");
        }
    }

    #[test]
    fn exit_code_never_improves_as_score_drops() {
        let mut previous = 0;
        let mut score = 100.0;
        while score >= 0.0 {
            let code = Status::from_score(score).exit_code();
            assert!(code >= previous, "exit code regressed at {score}");
            previous = code;
            score -= 0.5;
        }
    }

    #[test]
    fn summary_prefixes_in_analyzer_order() {
        let mut message = AnalysisResult::clean();
        message.warnings.push("short".to_string());
        let mut risk = AnalysisResult::clean();
        risk.issues.push("secret".to_string());
        let mut test = AnalysisResult::clean();
        test.warnings.push("ratio".to_string());

        let details = Details {
            message,
            diff: AnalysisResult::clean(),
            risk,
            test,
        };
        let summary = Summary::from_details(&details);
        assert_eq!(summary.issues, vec!["[risk] secret".to_string()]);
        assert_eq!(
            summary.warnings,
            vec!["[message] short".to_string(), "[test] ratio".to_string()]
        );
        assert!(summary.suggestions.is_empty());
    }
}
