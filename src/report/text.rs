use crate::types::analysis::AnalysisStats;
use crate::types::report::EvaluationResult;

const RULE: &str = "----------------------------------------------------------------------";
const BANNER: &str = "======================================================================";

pub fn to_text(result: &EvaluationResult) -> String {
    let mut output = String::new();
    output.push_str(BANNER);
    output.push('\n');
    match &result.commit {
        Some(commit) => output.push_str(&format!("GIT EVALUATE - Commit {commit}\n")),
        None => output.push_str("GIT EVALUATE - Staging Area Analysis\n"),
    }
    output.push_str(BANNER);
    output.push_str("\n\n");

    if let Some(message) = &result.commit_message {
        let subject = message.lines().next().unwrap_or_default();
        output.push_str(&format!("Commit message: {subject}\n"));
        if let Some(at) = result.committed_at {
            output.push_str(&format!("Committed at: {}\n", at.to_rfc3339()));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "Overall Score: {}/{} ({})\n\n",
        result.overall_score,
        result.max_score,
        result.status.as_str().to_uppercase()
    ));

    output.push_str("Detailed Scores:\n");
    output.push_str(RULE);
    output.push('\n');
    for (name, analysis) in result.details.iter() {
        output.push_str(&format!(
            "  {}: {}/{}\n",
            capitalize(name),
            analysis.score,
            analysis.max_score
        ));
    }
    output.push('\n');

    push_section(&mut output, "ISSUES (must fix):", "x", &result.summary.issues);
    push_section(&mut output, "WARNINGS (should fix):", "!", &result.summary.warnings);
    push_section(&mut output, "SUGGESTIONS:", "->", &result.summary.suggestions);

    if let Some(AnalysisStats::Diff(stats)) = &result.details.diff.stats {
        output.push_str("Change Statistics:\n");
        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!("  Files changed: {}\n", stats.files_changed));
        output.push_str(&format!("  Lines added: {}\n", stats.additions));
        output.push_str(&format!("  Lines deleted: {}\n", stats.deletions));
        output.push('\n');
    }

    if let Some(AnalysisStats::Test(stats)) = &result.details.test.stats {
        output.push_str(&format!("  Test files: {}\n", stats.test_files));
        output.push_str(&format!(
            "  Implementation files: {}\n",
            stats.implementation_files
        ));
        output.push_str(&format!("  Test lines: {}\n", stats.test_lines));
        output.push_str(&format!(
            "  Implementation lines: {}\n",
            stats.implementation_lines
        ));
        if stats.test_to_code_ratio > 0.0 {
            output.push_str(&format!(
                "  Test-to-code ratio: {}:1\n",
                stats.test_to_code_ratio
            ));
        }
        output.push('\n');
    }

    output.push_str(BANNER);
    output
}

fn push_section(output: &mut String, title: &str, marker: &str, entries: &[String]) {
    if entries.is_empty() {
        return;
    }
    output.push_str(title);
    output.push('\n');
    output.push_str(RULE);
    output.push('\n');
    for entry in entries {
        output.push_str(&format!("  {marker} {entry}\n"));
    }
    output.push('\n');
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
