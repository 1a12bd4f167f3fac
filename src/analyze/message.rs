use crate::types::analysis::{AnalysisResult, Findings};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

pub const CONVENTIONAL_TYPES: [&str; 11] = [
    "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

const SUBJECT_HARD_LIMIT: usize = 72;
const SUBJECT_SOFT_LIMIT: usize = 50;
const SUBJECT_MIN: usize = 10;
const BODY_LINE_LIMIT: usize = 72;

static CONVENTIONAL_SUBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z]+)(\([a-z0-9-]+\))?: .+").expect("Valid regex pattern")
});

pub fn analyze(message: &str) -> AnalysisResult {
    let mut findings = Findings::default();
    let trimmed = message.trim();
    if trimmed.is_empty() {
        findings.issue("Empty commit message");
        findings.suggest("Provide a meaningful commit message");
        return findings.finish(100, None);
    }

    let lines: Vec<&str> = trimmed.split('\n').collect();
    let subject = lines[0];

    let mut penalty = 0;
    penalty += check_subject_length(subject, &mut findings);
    penalty += check_subject_whitespace(subject, &mut findings);
    penalty += check_conventional_format(subject, &mut findings);
    penalty += check_capitalization(subject, &mut findings);
    penalty += check_period_ending(subject, &mut findings);

    if lines.len() > 1 {
        penalty += check_blank_line_after_subject(&lines, &mut findings);
        penalty += check_body_line_length(&lines, &mut findings);
    }

    debug!(penalty, lines = lines.len(), "message analyzed");
    findings.finish(penalty, None)
}

fn check_subject_length(subject: &str, findings: &mut Findings) -> u32 {
    let length = subject.chars().count();
    if length == 0 {
        findings.issue("Subject line is empty");
        20
    } else if length < SUBJECT_MIN {
        findings.warning(format!("Subject line is very short ({length} chars)"));
        findings.suggest("Consider providing more context in the subject");
        10
    } else if length > SUBJECT_HARD_LIMIT {
        findings.issue(format!(
            "Subject line is too long ({length} chars, max {SUBJECT_HARD_LIMIT})"
        ));
        findings.suggest(format!(
            "Keep subject line under {SUBJECT_HARD_LIMIT} characters"
        ));
        15
    } else if length > SUBJECT_SOFT_LIMIT {
        findings.warning(format!(
            "Subject line is longer than recommended ({length} chars, ideally <= {SUBJECT_SOFT_LIMIT})"
        ));
        5
    } else {
        0
    }
}

fn check_subject_whitespace(subject: &str, findings: &mut Findings) -> u32 {
    if subject.starts_with(char::is_whitespace) || subject.ends_with(char::is_whitespace) {
        findings.warning("Subject has leading or trailing whitespace");
        return 5;
    }
    0
}

fn check_conventional_format(subject: &str, findings: &mut Findings) -> u32 {
    let lowered = subject.to_lowercase();
    match CONVENTIONAL_SUBJECT.captures(&lowered) {
        Some(captures) => {
            let commit_type = &captures[1];
            if CONVENTIONAL_TYPES.contains(&commit_type) {
                0
            } else {
                findings.warning(format!(
                    "Unknown conventional commit type: '{commit_type}'"
                ));
                findings.suggest(format!("Use one of: {}", CONVENTIONAL_TYPES.join(", ")));
                5
            }
        }
        None => {
            findings.warning("Message doesn't follow conventional commit format");
            findings.suggest(
                "Consider using format: type(scope): description (e.g., 'feat: add new feature')",
            );
            10
        }
    }
}

fn check_capitalization(subject: &str, findings: &mut Findings) -> u32 {
    let description = subject
        .split_once(": ")
        .map(|(_, rest)| rest)
        .unwrap_or(subject);
    if description.chars().next().is_some_and(char::is_lowercase) {
        findings.warning("Subject description should start with capital letter");
        return 5;
    }
    0
}

fn check_period_ending(subject: &str, findings: &mut Findings) -> u32 {
    if subject.ends_with('.') {
        findings.warning("Subject should not end with a period");
        return 5;
    }
    0
}

fn check_blank_line_after_subject(lines: &[&str], findings: &mut Findings) -> u32 {
    if !lines[1].trim().is_empty() {
        findings.warning("Missing blank line after subject");
        findings.suggest("Add a blank line between subject and body");
        return 5;
    }
    0
}

fn check_body_line_length(lines: &[&str], findings: &mut Findings) -> u32 {
    // Body starts after the subject and its separator; reported line numbers are 1-based.
    let long_line = lines
        .iter()
        .enumerate()
        .skip(2)
        .find(|(_, line)| line.chars().count() > BODY_LINE_LIMIT);
    match long_line {
        Some((index, _)) => {
            findings.warning(format!(
                "Line {} in body exceeds {BODY_LINE_LIMIT} characters",
                index + 1
            ));
            2
        }
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_scores_zero() {
        let result = analyze("");
        assert_eq!(result.score, 0);
        assert_eq!(result.issues, vec!["Empty commit message".to_string()]);

        let result = analyze("   \n\t ");
        assert_eq!(result.score, 0);
        assert_eq!(result.issues, vec!["Empty commit message".to_string()]);
    }

    #[test]
    fn conventional_commit_scores_high() {
        let result = analyze("feat: add authentication");
        assert!(result.score >= 85, "score was {}", result.score);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn capitalized_conventional_commit_is_perfect() {
        let result = analyze("fix(auth): Handle expired refresh tokens");
        assert_eq!(result.score, 100);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn overlong_subject_is_an_issue() {
        let message = format!("feat: {}", "x".repeat(100));
        let result = analyze(&message);
        assert!(result.score < 100);
        assert!(result.issues.iter().any(|issue| issue.contains("too long")));
    }

    #[test]
    fn moderately_long_subject_is_a_warning() {
        let message = format!("feat: {}", "X".repeat(50));
        let result = analyze(&message);
        assert_eq!(result.score, 95);
        assert!(result.warnings.iter().any(|w| w.contains("longer than recommended")));
    }

    #[test]
    fn non_conventional_subject_is_penalized() {
        let result = analyze("Updated some files in the project");
        assert_eq!(result.score, 90);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("conventional commit format")));
        assert!(!result.suggestions.is_empty());
    }

    #[test]
    fn unknown_type_is_penalized_less_than_missing_format() {
        let result = analyze("feature: Add login page");
        assert_eq!(result.score, 95);
        assert!(result.warnings.iter().any(|w| w.contains("'feature'")));
    }

    #[test]
    fn uppercase_type_still_matches_conventional_format() {
        let result = analyze("FEAT: Add login page");
        assert_eq!(result.score, 100);
    }

    #[test]
    fn short_subject_with_period() {
        // short (10) + not conventional (10) + period (5)
        let result = analyze("Fix it.");
        assert_eq!(result.score, 75);
    }

    #[test]
    fn missing_blank_line_and_long_body_line() {
        let message = format!(
            "fix: Correct retry loop\nDetails follow here\n{}\n{}",
            "y".repeat(80),
            "z".repeat(90)
        );
        let result = analyze(&message);
        // blank line (5) + one long body line (2)
        assert_eq!(result.score, 93);
        assert!(result.warnings.iter().any(|w| w == "Line 3 in body exceeds 72 characters"));
        assert_eq!(
            result
                .warnings
                .iter()
                .filter(|w| w.contains("in body exceeds"))
                .count(),
            1
        );
    }

    #[test]
    fn well_formed_body_is_not_penalized() {
        let message = "fix: Correct retry loop\n\nThe loop never reset its counter.\nNow it does.";
        assert_eq!(analyze(message).score, 100);
    }

    #[test]
    fn analyze_is_idempotent() {
        let message = "wip";
        assert_eq!(analyze(message), analyze(message));
    }

    #[test]
    fn score_is_bounded_for_worst_case_subject() {
        let message = format!("{}.\nnot blank\n{}", "a".repeat(120), "b".repeat(200));
        let result = analyze(&message);
        assert!(result.score <= result.max_score);
    }
}
