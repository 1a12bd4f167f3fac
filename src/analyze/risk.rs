use crate::analyze::patch;
use crate::types::analysis::{AnalysisResult, FileStat, Findings};
use once_cell::sync::Lazy;
use regex::{RegexSet, RegexSetBuilder};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Secret detectors applied to added lines, in reporting order.
pub const SECRET_PATTERNS: [(&str, &str); 8] = [
    (
        r#"["']?api[_-]?key["']?\s*[:=]\s*["']?[a-zA-Z0-9_\-]{20,}["']?"#,
        "API key",
    ),
    (
        r#"["']?secret[_-]?key["']?\s*[:=]\s*["']?[a-zA-Z0-9_\-]{20,}["']?"#,
        "Secret key",
    ),
    (r#"["']?password["']?\s*[:=]\s*["'][^"']{8,}["']"#, "Password"),
    (
        r#"["']?token["']?\s*[:=]\s*["']?[a-zA-Z0-9_\-]{20,}["']?"#,
        "Token",
    ),
    (r"-----BEGIN (RSA |DSA )?PRIVATE KEY-----", "Private key"),
    (r"aws_access_key_id\s*=\s*[A-Z0-9]{20}", "AWS access key"),
    (
        r"aws_secret_access_key\s*=\s*[A-Za-z0-9/+=]{40}",
        "AWS secret key",
    ),
    (r"Bearer [A-Za-z0-9\-._~+/]+", "Bearer token"),
];

pub const SENSITIVE_FILES: [&str; 19] = [
    ".env",
    ".env.local",
    ".env.production",
    ".env.development",
    "credentials.json",
    "secrets.json",
    "secret.yaml",
    "secrets.yaml",
    ".aws/credentials",
    ".ssh/id_rsa",
    ".ssh/id_dsa",
    ".ssh/id_ecdsa",
    "id_rsa",
    "id_dsa",
    "id_ecdsa",
    ".npmrc",
    ".pypirc",
    ".dockercfg",
    ".docker/config.json",
];

pub const SENSITIVE_EXTENSIONS: [&str; 6] = [".pem", ".key", ".p12", ".pfx", ".keystore", ".jks"];

pub const BINARY_EXTENSIONS: [&str; 38] = [
    ".exe", ".dll", ".so", ".dylib", ".bin", ".dat", ".pdf", ".doc", ".docx", ".xls", ".xlsx",
    ".ppt", ".pptx", ".zip", ".tar", ".gz", ".7z", ".rar", ".jpg", ".jpeg", ".png", ".gif", ".bmp",
    ".ico", ".svg", ".mp3", ".mp4", ".avi", ".mov", ".wav", ".class", ".jar", ".war", ".ear",
    ".pyc", ".pyo", ".o", ".a",
];

const SENSITIVE_PENALTY: u32 = 30;
const SENSITIVE_EXTENSION_PENALTY: u32 = 15;
const SENSITIVE_CAP: u32 = 50;
const BINARY_PENALTY: u32 = 5;
const BINARY_CAP: u32 = 20;
const SECRET_PENALTY: u32 = 25;
const SECRET_CAP: u32 = 75;

static SECRETS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSetBuilder::new(SECRET_PATTERNS.iter().map(|(pattern, _)| *pattern))
        .case_insensitive(true)
        .build()
        .expect("Valid regex pattern")
});

/// Filename and extension tables for the sensitive-file check.
#[derive(Debug, Clone)]
pub struct RiskRules {
    sensitive_files: BTreeSet<String>,
    sensitive_extensions: BTreeSet<String>,
}

impl Default for RiskRules {
    fn default() -> Self {
        Self {
            sensitive_files: SENSITIVE_FILES.iter().map(|name| name.to_string()).collect(),
            sensitive_extensions: SENSITIVE_EXTENSIONS
                .iter()
                .map(|extension| extension.to_string())
                .collect(),
        }
    }
}

impl RiskRules {
    pub fn with_extra(files: &[String], extensions: &[String]) -> Self {
        let mut rules = Self::default();
        rules
            .sensitive_files
            .extend(files.iter().map(|name| name.trim().to_string()));
        rules
            .sensitive_extensions
            .extend(extensions.iter().map(|ext| ext.trim().to_lowercase()));
        rules
    }

    fn is_sensitive_file(&self, filename: &str) -> bool {
        self.sensitive_files.contains(patch::basename(filename))
            || self.sensitive_files.contains(filename)
    }

    fn is_sensitive_extension(&self, extension: &str) -> bool {
        self.sensitive_extensions.contains(extension)
    }
}

pub fn analyze(diff: &str, file_stats: &[FileStat], rules: &RiskRules) -> AnalysisResult {
    let mut findings = Findings::default();
    if diff.is_empty() || file_stats.is_empty() {
        return AnalysisResult::clean();
    }

    let sensitive = check_sensitive_files(file_stats, rules, &mut findings);
    let binary = check_binary_files(file_stats, &mut findings);
    let secrets = check_secrets(diff, &mut findings);
    debug!(sensitive, binary, secrets, "risk penalties");

    findings.finish(sensitive + binary + secrets, None)
}

fn check_sensitive_files(
    file_stats: &[FileStat],
    rules: &RiskRules,
    findings: &mut Findings,
) -> u32 {
    let mut penalty = 0;
    for stat in file_stats {
        let filename = stat.filename.as_str();
        if rules.is_sensitive_file(filename) {
            findings.issue(format!("Sensitive file detected: {filename}"));
            findings.suggest(format!(
                "Avoid committing sensitive files like {filename}. Add to .gitignore"
            ));
            penalty += SENSITIVE_PENALTY;
        } else if rules.is_sensitive_extension(&patch::extension(filename).to_lowercase()) {
            findings.warning(format!("Potentially sensitive file type: {filename}"));
            findings.suggest(format!(
                "Review {filename} to ensure no secrets are included"
            ));
            penalty += SENSITIVE_EXTENSION_PENALTY;
        }
    }
    penalty.min(SENSITIVE_CAP)
}

fn check_binary_files(file_stats: &[FileStat], findings: &mut Findings) -> u32 {
    let mut penalty = 0;
    for stat in file_stats {
        let extension = patch::extension(&stat.filename).to_lowercase();
        if BINARY_EXTENSIONS.contains(&extension.as_str()) {
            findings.warning(format!("Binary file detected: {}", stat.filename));
            findings.suggest(
                "Consider storing large binaries outside of git (use Git LFS if needed)",
            );
            penalty += BINARY_PENALTY;
        }
    }
    penalty.min(BINARY_CAP)
}

/// Scans added lines only; secrets on removed lines are not penalized.
fn check_secrets(diff: &str, findings: &mut Findings) -> u32 {
    let mut found = BTreeSet::new();
    let mut penalty = 0;
    for content in patch::added_lines(diff) {
        for index in SECRETS.matches(content).iter() {
            let name = SECRET_PATTERNS[index].1;
            if found.insert(name) {
                trace!(pattern = name, "secret pattern matched");
                findings.issue(format!("Potential secret detected: {name}"));
                findings.suggest(format!(
                    "Remove hardcoded {name} and use environment variables instead"
                ));
                penalty += SECRET_PENALTY;
            }
        }
    }
    penalty.min(SECRET_CAP)
}
