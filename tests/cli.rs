#![allow(deprecated)]

// End-to-end tests for the git-evaluate binary against throwaway repositories.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command as ProcessCommand;
use tempfile::TempDir;

fn git_evaluate() -> Command {
    Command::cargo_bin("git-evaluate").expect("binary should compile")
}

fn git(dir: &Path, args: &[&str]) {
    let output = ProcessCommand::new("git")
        .arg("-C")
        .arg(dir)
        .args(["-c", "user.name=Tester", "-c", "user.email=tester@example.com"])
        .args(args)
        .output()
        .expect("git should run");
    assert!(output.status.success(), "git {args:?} should succeed");
}

fn init_repo() -> TempDir {
    let repo = TempDir::new().expect("temp dir should be created");
    git(repo.path(), &["init", "--quiet"]);
    repo
}

fn stage(repo: &Path, path: &str, contents: &str) {
    let target = repo.join(path);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).expect("parent dirs should be created");
    }
    fs::write(&target, contents).expect("file should be written");
    git(repo, &["add", path]);
}

fn stage_tested_change(repo: &Path) {
    stage(
        repo,
        "src/greet.py",
        "def greet(name):\n    return f'hello {name}'\n",
    );
    stage(
        repo,
        "tests/test_greet.py",
        "from src.greet import greet\n\ndef test_greet():\n    assert greet('a') == 'hello a'\n",
    );
}

#[test]
fn cli_version_flag() {
    git_evaluate()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("git-evaluate"));
}

#[test]
fn cli_help_lists_exit_codes() {
    git_evaluate()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--message"))
        .stdout(predicate::str::contains("Exit codes:"));
}

#[test]
fn message_and_commit_are_mutually_exclusive() {
    git_evaluate()
        .args(["-m", "feat: Add thing", "-c", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn non_repository_exits_with_code_3() {
    let dir = TempDir::new().expect("temp dir should be created");
    git_evaluate()
        .arg("--repo")
        .arg(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn unknown_commit_exits_with_code_3() {
    let repo = init_repo();
    git_evaluate()
        .arg("--repo")
        .arg(repo.path())
        .args(["-c", "no-such-ref"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown commit reference: no-such-ref"));
}

#[test]
fn empty_staging_area_reports_no_changes() {
    let repo = init_repo();
    git_evaluate()
        .arg("--repo")
        .arg(repo.path())
        .args(["-m", "feat(core): Add greeting helper"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Staging Area Analysis"))
        .stdout(predicate::str::contains("[diff] No changes in staging area"));
}

#[test]
fn well_tested_change_passes() {
    let repo = init_repo();
    stage_tested_change(repo.path());

    git_evaluate()
        .arg("--repo")
        .arg(repo.path())
        .args(["-m", "feat(core): Add greeting helper"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Overall Score: 100/100 (EXCELLENT)"))
        .stdout(predicate::str::contains("  Test files: 1"));
}

#[test]
fn leaked_secrets_fail_with_warning_code() {
    let repo = init_repo();
    stage(
        repo.path(),
        ".env",
        "password = \"hunter22secret\"\napi_key = \"abcdefghijklmnopqrstuvwxyz\"\n",
    );

    git_evaluate()
        .arg("--repo")
        .arg(repo.path())
        .arg("--json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"status\": \"warning\""))
        .stdout(predicate::str::contains("[risk] Sensitive file detected: .env"))
        .stdout(predicate::str::contains("[message] Empty commit message"));
}

#[test]
fn json_output_has_result_shape() {
    let repo = init_repo();
    stage_tested_change(repo.path());

    let output = git_evaluate()
        .arg("--repo")
        .arg(repo.path())
        .args(["-m", "feat(core): Add greeting helper", "--format", "json"])
        .output()
        .expect("binary should run");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["overall_score"], 100.0);
    assert_eq!(value["max_score"], 100);
    assert_eq!(value["exit_code"], 0);
    for analyzer in ["message", "diff", "risk", "test"] {
        assert!(value["details"][analyzer]["score"].is_u64(), "{analyzer}");
    }
    assert_eq!(value["details"]["diff"]["stats"]["files_changed"], 2);
}

#[test]
fn commit_mode_scores_history() {
    let repo = init_repo();
    stage_tested_change(repo.path());
    git(
        repo.path(),
        &["commit", "--quiet", "-m", "feat(core): Add greeting helper"],
    );

    git_evaluate()
        .arg("--repo")
        .arg(repo.path())
        .args(["-c", "HEAD"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("GIT EVALUATE - Commit "))
        .stdout(predicate::str::contains(
            "Commit message: feat(core): Add greeting helper",
        ));
}

#[test]
fn repository_config_selects_output_format() {
    let repo = init_repo();
    stage_tested_change(repo.path());
    fs::write(
        repo.path().join("git-evaluate.toml"),
        "[output]\nformat = \"sarif\"\n",
    )
    .expect("config should be written");

    git_evaluate()
        .arg("--repo")
        .arg(repo.path())
        .args(["-m", "update"])
        .assert()
        .stdout(predicate::str::contains("\"version\": \"2.1.0\""))
        .stdout(predicate::str::contains("git-evaluate"));
}

#[test]
fn invalid_config_exits_with_code_3() {
    let repo = init_repo();
    fs::write(
        repo.path().join("git-evaluate.toml"),
        "[test]\nratio_mode = \"sideways\"\n",
    )
    .expect("config should be written");

    git_evaluate()
        .arg("--repo")
        .arg(repo.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config parse error"));
}
