use serde::{Deserialize, Serialize};

pub type Score = u32;

pub const MAX_SCORE: Score = 100;

/// Per-file line counts for one changed path.
///
/// Counts default to zero when absent, as binary entries from the provider
/// carry no line information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    pub filename: String,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

impl FileStat {
    pub fn new(filename: impl Into<String>, additions: u64, deletions: u64) -> Self {
        Self {
            filename: filename.into(),
            additions,
            deletions,
        }
    }

    pub fn changes(&self) -> u64 {
        self.additions + self.deletions
    }
}

/// Findings collected during a single `analyze` call.
#[derive(Debug, Clone, Default)]
pub struct Findings {
    issues: Vec<String>,
    warnings: Vec<String>,
    suggestions: Vec<String>,
}

impl Findings {
    pub fn issue(&mut self, text: impl Into<String>) {
        self.issues.push(text.into());
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.warnings.push(text.into());
    }

    pub fn suggest(&mut self, text: impl Into<String>) {
        self.suggestions.push(text.into());
    }

    /// Closes the accumulator into a result scored as `MAX_SCORE - penalty`, floored at zero.
    pub fn finish(self, penalty: u32, stats: Option<AnalysisStats>) -> AnalysisResult {
        AnalysisResult {
            score: MAX_SCORE.saturating_sub(penalty),
            max_score: MAX_SCORE,
            issues: self.issues,
            warnings: self.warnings,
            suggestions: self.suggestions,
            stats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub score: Score,
    pub max_score: Score,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<AnalysisStats>,
}

impl AnalysisResult {
    /// A full-score result with no findings.
    pub fn clean() -> Self {
        Findings::default().finish(0, None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisStats {
    Diff(DiffStats),
    Test(TestStats),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub files_changed: usize,
    pub additions: u64,
    pub deletions: u64,
    pub total_changes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestStats {
    pub test_files: usize,
    pub implementation_files: usize,
    pub other_files: usize,
    pub test_lines: u64,
    pub implementation_lines: u64,
    pub test_to_code_ratio: f64,
}
