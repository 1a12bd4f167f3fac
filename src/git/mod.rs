pub mod numstat;

use crate::error::{EvaluateError, Result};
use crate::types::analysis::FileStat;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Diff text plus per-file counts for one changeset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    pub diff: String,
    pub file_stats: Vec<FileStat>,
}

/// A historical commit's changes and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitChanges {
    pub short_hash: String,
    pub message: String,
    pub committed_at: Option<DateTime<Utc>>,
    pub changes: ChangeSet,
}

/// Source of diff text and file statistics.
pub trait ChangeProvider {
    fn staged(&self) -> Result<ChangeSet>;
    fn commit(&self, reference: &str) -> Result<CommitChanges>;
}

/// A repository driven through the `git` binary.
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Locates the enclosing work tree, searching parent directories.
    pub fn discover(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EvaluateError::PathNotFound(path.display().to_string()));
        }
        let output = Command::new("git")
            .arg("-C")
            .arg(path)
            .args(["rev-parse", "--show-toplevel"])
            .output()?;
        if !output.status.success() {
            return Err(EvaluateError::NotGitRepo(path.display().to_string()));
        }
        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(root = %root, "discovered repository");
        Ok(Self {
            root: PathBuf::from(root),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Runs git with path quoting off so non-ASCII filenames come back verbatim.
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.root)
            .args(["-c", "core.quotePath=false"])
            .args(args)
            .output()?;
        if !output.status.success() {
            return Err(EvaluateError::Git {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn resolve_commit(&self, reference: &str) -> Result<String> {
        let spec = format!("{reference}^{{commit}}");
        self.run(&["rev-parse", "--verify", "--quiet", &spec])
            .map(|sha| sha.trim().to_string())
            .map_err(|_| EvaluateError::BadRevision(reference.to_string()))
    }
}

impl ChangeProvider for GitRepo {
    fn staged(&self) -> Result<ChangeSet> {
        let diff = self.run(&["diff", "--cached", "--no-color", "--no-ext-diff"])?;
        let stats = self.run(&["diff", "--cached", "--no-ext-diff", "--numstat"])?;
        Ok(ChangeSet {
            diff,
            file_stats: numstat::parse_numstat(&stats),
        })
    }

    fn commit(&self, reference: &str) -> Result<CommitChanges> {
        let sha = self.resolve_commit(reference)?;
        let short_hash = self.run(&["rev-parse", "--short", &sha])?.trim().to_string();
        let message = self
            .run(&["log", "-1", "--format=%B", &sha])?
            .trim_end()
            .to_string();
        let committed_at = self
            .run(&["log", "-1", "--format=%ct", &sha])?
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0));
        let diff = self.run(&["show", "--format=", "--no-color", "--no-ext-diff", &sha])?;
        let stats = self.run(&["show", "--format=", "--no-ext-diff", "--numstat", &sha])?;

        Ok(CommitChanges {
            short_hash,
            message,
            committed_at,
            changes: ChangeSet {
                diff,
                file_stats: numstat::parse_numstat(&stats),
            },
        })
    }
}
