use crate::analyze::patch;
use crate::types::analysis::{AnalysisResult, AnalysisStats, DiffStats, FileStat, Findings};
use std::collections::BTreeSet;
use tracing::debug;

const MAX_DIRECTORIES: usize = 5;
const MAX_EXTENSIONS: usize = 5;

pub fn analyze(diff: &str, file_stats: &[FileStat]) -> AnalysisResult {
    let mut findings = Findings::default();
    if diff.is_empty() || file_stats.is_empty() {
        findings.warning("No changes in staging area");
        findings.suggest("Stage some changes before running evaluation");
        return findings.finish(0, None);
    }

    let additions: u64 = file_stats.iter().map(|stat| stat.additions).sum();
    let deletions: u64 = file_stats.iter().map(|stat| stat.deletions).sum();
    let stats = DiffStats {
        files_changed: file_stats.len(),
        additions,
        deletions,
        total_changes: additions + deletions,
    };

    let size = check_diff_size(stats.total_changes, &mut findings);
    let count = check_file_count(stats.files_changed, &mut findings);
    let large = check_large_files(file_stats, &mut findings);
    let coherence = check_coherence(file_stats, &mut findings);
    debug!(size, count, large, coherence, "diff penalties");

    findings.finish(
        size + count + large + coherence,
        Some(AnalysisStats::Diff(stats)),
    )
}

fn check_diff_size(total_changes: u64, findings: &mut Findings) -> u32 {
    if total_changes == 0 {
        findings.warning("No line changes detected");
        return 0;
    }

    if total_changes > 500 {
        findings.issue(format!("Very large diff: {total_changes} lines changed"));
        findings.suggest("Split into multiple atomic commits (recommended: <200 lines)");
        30
    } else if total_changes > 300 {
        findings.issue(format!("Large diff: {total_changes} lines changed"));
        findings.suggest(
            "Large commits are hard to review. Consider splitting (recommended: <200 lines)",
        );
        20
    } else if total_changes > 200 {
        findings.warning(format!(
            "Moderately large diff: {total_changes} lines changed"
        ));
        findings.suggest("Consider smaller, focused commits for easier review");
        12
    } else if total_changes > 100 {
        findings.warning(format!("Significant diff: {total_changes} lines changed"));
        5
    } else {
        0
    }
}

fn check_file_count(files: usize, findings: &mut Findings) -> u32 {
    if files > 10 {
        findings.issue(format!("Too many files changed: {files} files"));
        findings.suggest("Split into atomic commits (recommended: 1-5 files per commit)");
        25
    } else if files > 5 {
        findings.warning(format!("Many files changed: {files} files"));
        findings.suggest("Consider splitting into smaller, focused commits");
        15
    } else if files > 3 {
        findings.warning(format!("Several files changed: {files} files"));
        8
    } else {
        0
    }
}

/// Very large and large files accumulate against separate ceilings (25 and 15).
fn check_large_files(file_stats: &[FileStat], findings: &mut Findings) -> u32 {
    let mut very_large = 0;
    let mut large = 0;
    for stat in file_stats {
        let changes = stat.changes();
        if changes > 300 {
            findings.issue(format!(
                "Very large changes in single file: {} ({changes} lines)",
                stat.filename
            ));
            findings.suggest(format!(
                "Refactor {} changes into smaller commits",
                stat.filename
            ));
            very_large = (very_large + 10).min(25);
        } else if changes > 150 {
            findings.warning(format!(
                "Large changes in single file: {} ({changes} lines)",
                stat.filename
            ));
            large = (large + 5).min(15);
        }
    }
    very_large + large
}

fn check_coherence(file_stats: &[FileStat], findings: &mut Findings) -> u32 {
    let mut directories = BTreeSet::new();
    let mut extensions = BTreeSet::new();
    for stat in file_stats {
        if let Some(dir) = patch::parent_dir(&stat.filename) {
            directories.insert(dir);
        }
        if let Some((_, extension)) = stat.filename.rsplit_once('.') {
            extensions.insert(extension);
        }
    }

    let mut penalty = 0;
    if directories.len() > MAX_DIRECTORIES {
        findings.warning(format!(
            "Changes span many directories ({})",
            directories.len()
        ));
        findings.suggest("Consider grouping related changes in separate commits");
        penalty += 10;
    }
    if extensions.len() > MAX_EXTENSIONS {
        findings.warning(format!(
            "Changes involve many file types ({})",
            extensions.len()
        ));
        penalty += 5;
    }
    penalty
}
