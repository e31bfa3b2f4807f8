//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn examforge() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("examforge").unwrap()
}

/// A scaffolded working directory: config plus four sample sections.
fn init_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    examforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
    dir
}

fn register_student(dir: &TempDir, id: &str) {
    examforge()
        .current_dir(dir.path())
        .args([
            "register", "student", "--id", id, "--name", "Ada", "--surname", "Aydin", "--class",
            "7-A",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Registered {id}")));
}

/// Enough "1" lines to answer every question in a full attempt; "1" is a
/// valid selection for every question kind.
fn all_ones() -> String {
    "1\n".repeat(40)
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    examforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created examforge.toml"))
        .stdout(predicate::str::contains("section 4"));

    assert!(dir.path().join("examforge.toml").exists());
    for section in 1..=4 {
        assert!(dir
            .path()
            .join(format!("examforge-data/questions_section{section}.json"))
            .exists());
        assert!(dir
            .path()
            .join(format!("examforge-data/answer_key_section{section}.json"))
            .exists());
    }
}

#[test]
fn init_skips_existing() {
    let dir = init_dir();
    examforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_scaffolded_sections() {
    let dir = init_dir();
    examforge()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("All sections valid"));
}

#[test]
fn validate_missing_data_dir_fails() {
    let dir = TempDir::new().unwrap();
    examforge()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("section 1"));
}

#[test]
fn register_rejects_duplicates() {
    let dir = init_dir();
    register_student(&dir, "10");
    examforge()
        .current_dir(dir.path())
        .args([
            "register", "student", "--id", "10", "--name", "Ada", "--surname", "Aydin",
            "--class", "7-A",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already registered"));
}

#[test]
fn results_before_any_attempt() {
    let dir = init_dir();
    register_student(&dir, "10");
    examforge()
        .current_dir(dir.path())
        .args(["results", "--participant", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recorded attempts"));
}

#[test]
fn take_unknown_participant_is_refused() {
    let dir = init_dir();
    examforge()
        .current_dir(dir.path())
        .args(["take", "--participant", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("participant not found"));
}

#[test]
fn take_refuses_teachers() {
    let dir = init_dir();
    examforge()
        .current_dir(dir.path())
        .args([
            "register", "teacher", "--name", "Mehmet", "--surname", "Kaya", "--section", "1",
        ])
        .assert()
        .success();

    examforge()
        .current_dir(dir.path())
        .args(["take", "--participant", "mehmet_kaya"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a student"));
}

#[test]
fn full_attempt_then_results_and_stats() {
    let dir = init_dir();
    register_student(&dir, "10");

    examforge()
        .current_dir(dir.path())
        .args(["take", "--participant", "10"])
        .write_stdin(all_ones())
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Section 1 ==="))
        .stdout(predicate::str::contains("Results (attempt #1)"))
        .stdout(predicate::str::contains("Overall:"));

    examforge()
        .current_dir(dir.path())
        .args(["results", "--participant", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Attempts for participant 10"))
        .stdout(predicate::str::contains("1"));

    examforge()
        .current_dir(dir.path())
        .args(["stats", "--section", "1", "--class", "7-A", "--participant", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Section 1: 1 attempt(s)"))
        .stdout(predicate::str::contains("Class 7-A"))
        .stdout(predicate::str::contains("Participant 10"));
}

#[test]
fn attempt_limit_is_enforced_across_runs() {
    let dir = init_dir();
    register_student(&dir, "10");

    for _ in 0..3 {
        examforge()
            .current_dir(dir.path())
            .args(["take", "--participant", "10"])
            .write_stdin(all_ones())
            .assert()
            .success();
    }

    examforge()
        .current_dir(dir.path())
        .args(["take", "--participant", "10"])
        .write_stdin(all_ones())
        .assert()
        .failure()
        .stderr(predicate::str::contains("attempt limit reached"));
}

#[test]
fn stats_with_no_history() {
    let dir = init_dir();
    examforge()
        .current_dir(dir.path())
        .args(["stats", "--section", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no attempts recorded yet"));
}

#[test]
fn data_dir_flag_overrides_config() {
    let dir = init_dir();
    let elsewhere = TempDir::new().unwrap();
    examforge()
        .current_dir(dir.path())
        .args(["validate", "--data-dir"])
        .arg(elsewhere.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn help_output() {
    examforge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Multi-section timed quiz engine"));
}

#[test]
fn version_output() {
    examforge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("examforge"));
}
