use crate::analyze::patch;
use crate::types::analysis::{AnalysisResult, AnalysisStats, FileStat, Findings, TestStats};
use crate::types::config::RatioMode;
use crate::types::scoring::round2;
use once_cell::sync::Lazy;
use regex::{RegexSet, RegexSetBuilder};
use tracing::{debug, trace};

/// Filename conventions marking test code, matched case-insensitively anywhere in the path.
pub const TEST_FILE_PATTERNS: [&str; 26] = [
    // Python
    r"test_.*\.py$",
    r".*_test\.py$",
    // JavaScript / TypeScript
    r".*\.test\.js$",
    r".*\.test\.ts$",
    r".*\.test\.jsx$",
    r".*\.test\.tsx$",
    r".*\.spec\.js$",
    r".*\.spec\.ts$",
    r".*\.spec\.jsx$",
    r".*\.spec\.tsx$",
    // .NET
    r".*Tests?\.cs$",
    r".*Tests?\.fs$",
    r".*\.Tests?\.cs$",
    r".*\.Tests?\.fs$",
    r".*UnitTests?\.cs$",
    r".*IntegrationTests?\.cs$",
    // Java
    r".*Test\.java$",
    r".*Tests\.java$",
    // Go, Ruby
    r".*_test\.go$",
    r".*_test\.rb$",
    // Test directories
    r"[Tt]est/.*",
    r"[Tt]ests/.*",
    r"__tests__/.*",
    r".*\.Tests/.*",
    r".*\.UnitTests/.*",
    r".*\.IntegrationTests/.*",
];

/// Added-content markers of a test framework (imports and test attributes).
pub const TEST_CONTENT_INDICATORS: [&str; 11] = [
    r"using\s+NUnit\.Framework",
    r"using\s+Xunit",
    r"using\s+Microsoft\.VisualStudio\.TestTools\.UnitTesting",
    r"using\s+FluentAssertions",
    r"using\s+Moq",
    r"\[Test\]",
    r"\[TestMethod\]",
    r"\[Fact\]",
    r"\[Theory\]",
    r"\[TestFixture\]",
    r"\[TestClass\]",
];

/// An implementation extension plus the basename shapes that exclude a file from it.
#[derive(Debug, Clone, Copy)]
pub struct ImplRule {
    pub extension: &'static str,
    pub excluded_prefixes: &'static [&'static str],
    pub excluded_suffixes: &'static [&'static str],
}

impl ImplRule {
    const fn new(
        extension: &'static str,
        excluded_prefixes: &'static [&'static str],
        excluded_suffixes: &'static [&'static str],
    ) -> Self {
        Self {
            extension,
            excluded_prefixes,
            excluded_suffixes,
        }
    }

    fn matches(&self, basename: &str) -> bool {
        basename.ends_with(self.extension)
            && !self
                .excluded_prefixes
                .iter()
                .any(|prefix| basename.starts_with(prefix))
            && !self
                .excluded_suffixes
                .iter()
                .any(|suffix| basename.ends_with(suffix))
    }
}

pub const IMPL_RULES: [ImplRule; 10] = [
    ImplRule::new(".py", &["test_"], &["_test.py"]),
    ImplRule::new(".js", &[], &[".test.js", ".spec.js"]),
    ImplRule::new(".ts", &[], &[".test.ts", ".spec.ts"]),
    ImplRule::new(".jsx", &[], &[".test.jsx", ".spec.jsx"]),
    ImplRule::new(".tsx", &[], &[".test.tsx", ".spec.tsx"]),
    ImplRule::new(".cs", &[], &["Test.cs", "Tests.cs"]),
    ImplRule::new(".fs", &[], &["Test.fs", "Tests.fs"]),
    ImplRule::new(".java", &[], &["Test.java", "Tests.java"]),
    ImplRule::new(".go", &[], &["_test.go"]),
    ImplRule::new(".rb", &[], &["_test.rb"]),
];

pub const IMPL_DIRECTORIES: [&str; 5] = ["src", "lib", "app", "pkg", "internal"];

pub const NON_CODE_BASENAMES: [&str; 7] = [
    ".gitignore",
    "README.md",
    "LICENSE",
    "setup.py",
    "package.json",
    "requirements.txt",
    "Makefile",
];

static TEST_FILES: Lazy<RegexSet> = Lazy::new(|| {
    RegexSetBuilder::new(TEST_FILE_PATTERNS)
        .case_insensitive(true)
        .build()
        .expect("Valid regex pattern")
});

static TEST_CONTENT: Lazy<RegexSet> =
    Lazy::new(|| RegexSet::new(TEST_CONTENT_INDICATORS).expect("Valid regex pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    Test,
    Implementation,
    Other,
}

pub fn classify(filename: &str) -> FileClass {
    if is_test_file(filename) {
        FileClass::Test
    } else if is_implementation_file(filename) {
        FileClass::Implementation
    } else {
        FileClass::Other
    }
}

pub fn is_test_file(filename: &str) -> bool {
    TEST_FILES.is_match(filename)
}

pub fn is_implementation_file(filename: &str) -> bool {
    let basename = patch::basename(filename);
    if NON_CODE_BASENAMES.contains(&basename) {
        return false;
    }
    let extension = patch::extension(filename);
    let Some(rule) = IMPL_RULES.iter().find(|rule| rule.extension == extension) else {
        return false;
    };
    let in_impl_dir = filename
        .split_once('/')
        .is_some_and(|(top, _)| IMPL_DIRECTORIES.contains(&top));
    in_impl_dir || rule.matches(basename)
}

fn has_test_indicators(lines: &[&str]) -> bool {
    TEST_CONTENT.is_match(&lines.join("\n"))
}

pub fn analyze(file_stats: &[FileStat], diff: &str, mode: RatioMode) -> AnalysisResult {
    let mut findings = Findings::default();
    if file_stats.is_empty() {
        return AnalysisResult::clean();
    }

    let mut classes: Vec<FileClass> = file_stats
        .iter()
        .map(|stat| classify(&stat.filename))
        .collect();

    if !diff.is_empty() {
        promote_by_content(file_stats, &mut classes, diff);
    }

    let mut counts = ClassCounts::default();
    for (stat, class) in file_stats.iter().zip(&classes) {
        trace!(file = %stat.filename, ?class, "classified");
        counts.add(*class, stat.additions);
    }

    let penalty = check_test_presence(&counts, mode, &mut findings);
    debug!(penalty, ?mode, ?counts, "test presence analyzed");

    let ratio = if counts.impl_lines > 0 {
        round2(counts.test_lines as f64 / counts.impl_lines as f64)
    } else {
        0.0
    };
    let stats = TestStats {
        test_files: counts.test_files,
        implementation_files: counts.impl_files,
        other_files: counts.other_files,
        test_lines: counts.test_lines,
        implementation_lines: counts.impl_lines,
        test_to_code_ratio: ratio,
    };
    findings.finish(penalty, Some(AnalysisStats::Test(stats)))
}

/// Reclassifies files whose added content carries test-framework markers.
fn promote_by_content(file_stats: &[FileStat], classes: &mut [FileClass], diff: &str) {
    for (path, lines) in patch::added_lines_by_file(diff) {
        if !has_test_indicators(&lines) {
            continue;
        }
        for (stat, class) in file_stats.iter().zip(classes.iter_mut()) {
            if stat.filename == path && *class != FileClass::Test {
                trace!(file = %path, "promoted to test by content");
                *class = FileClass::Test;
            }
        }
    }
}

#[derive(Debug, Default)]
struct ClassCounts {
    test_files: usize,
    impl_files: usize,
    other_files: usize,
    test_lines: u64,
    impl_lines: u64,
}

impl ClassCounts {
    fn add(&mut self, class: FileClass, additions: u64) {
        match class {
            FileClass::Test => {
                self.test_files += 1;
                self.test_lines += additions;
            }
            FileClass::Implementation => {
                self.impl_files += 1;
                self.impl_lines += additions;
            }
            FileClass::Other => self.other_files += 1,
        }
    }
}

fn check_test_presence(counts: &ClassCounts, mode: RatioMode, findings: &mut Findings) -> u32 {
    if counts.impl_files == 0 {
        return 0;
    }

    if counts.test_files == 0 {
        findings.issue(format!(
            "No test files found ({} lines of implementation code added)",
            counts.impl_lines
        ));
        findings.suggest("Add or update tests to cover your changes (TDD: aim for 1:1 ratio)");
        return 40;
    }

    match mode {
        RatioMode::Lines => check_line_ratio(counts, findings),
        RatioMode::Files => check_file_ratio(counts, findings),
    }
}

fn check_line_ratio(counts: &ClassCounts, findings: &mut Findings) -> u32 {
    if counts.impl_lines == 0 {
        return 0;
    }
    let (test_lines, impl_lines) = (counts.test_lines, counts.impl_lines);
    let ratio = test_lines as f64 / impl_lines as f64;
    if ratio < 0.3 {
        findings.issue(format!(
            "Very low test-to-code ratio: {test_lines} test lines vs {impl_lines} implementation lines (ratio: {ratio:.2})"
        ));
        findings.suggest("Aim for at least a 1:1 test-to-code ratio");
        30
    } else if ratio < 0.5 {
        findings.warning(format!(
            "Low test-to-code ratio: {test_lines} test lines vs {impl_lines} implementation lines (ratio: {ratio:.2})"
        ));
        findings.suggest("Consider increasing test coverage (target: >= 1:1)");
        20
    } else if ratio < 1.0 {
        findings.warning(format!(
            "Moderate test-to-code ratio: {test_lines} test lines vs {impl_lines} implementation lines (ratio: {ratio:.2})"
        ));
        findings.suggest("Good progress; the target is a ratio of at least 1:1");
        10
    } else {
        0
    }
}

fn check_file_ratio(counts: &ClassCounts, findings: &mut Findings) -> u32 {
    if counts.impl_lines == 0 {
        return 0;
    }
    let (test_files, impl_files) = (counts.test_files, counts.impl_files);
    let ratio = test_files as f64 / impl_files as f64;
    if ratio < 0.3 {
        findings.issue(format!(
            "Very low test-to-code ratio: {test_files} test files vs {impl_files} implementation files (ratio: {ratio:.2})"
        ));
        findings.suggest("Add tests alongside each changed implementation file");
        20
    } else if ratio < 0.5 {
        findings.warning(format!(
            "Low test-to-code ratio: {test_files} test files vs {impl_files} implementation files (ratio: {ratio:.2})"
        ));
        findings.suggest("Consider adding tests for more of the changed files");
        10
    } else {
        0
    }
}
