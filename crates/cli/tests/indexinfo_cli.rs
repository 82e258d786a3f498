use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[allow(deprecated)]
fn indexinfo() -> Command {
    let mut cmd = Command::cargo_bin("indexinfo").expect("binary");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_manual(root: &Path, file: &str, section: &str, entry: &str) {
    fs::write(
        root.join(file),
        format!(
            "INFO-DIR-SECTION {section}\nSTART-INFO-DIR-ENTRY\n{entry}\nEND-INFO-DIR-ENTRY\n\x1f\n"
        ),
    )
    .unwrap();
}

#[test]
fn writes_dir_index_silently() {
    let temp = tempdir().unwrap();
    write_manual(temp.path(), "grep.info", "Text tools", "* grep: (grep). Search.");

    indexinfo()
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    let index = fs::read_to_string(temp.path().join("dir")).unwrap();
    assert!(index.starts_with("Produced by: indexinfo "));
    assert!(index.ends_with("* Menu:\n\nText tools\n* grep: (grep). Search.\n"));
}

#[test]
fn missing_directory_argument_prints_usage() {
    indexinfo()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn extra_arguments_are_rejected() {
    let temp = tempdir().unwrap();
    indexinfo()
        .arg(temp.path())
        .arg(temp.path())
        .assert()
        .failure();
}

#[test]
fn unopenable_directory_is_fatal() {
    let temp = tempdir().unwrap();
    indexinfo()
        .arg(temp.path().join("missing"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Impossible to open"));
}

#[test]
fn stale_index_that_cannot_be_removed_is_fatal() {
    let temp = tempdir().unwrap();
    fs::create_dir(temp.path().join("dir")).unwrap();

    indexinfo()
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("stale index"));
}

#[test]
fn empty_run_removes_stale_index() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("dir"), "stale").unwrap();

    indexinfo().arg(temp.path()).assert().success();

    assert!(!temp.path().join("dir").exists());
}

#[test]
fn unreadable_manual_is_reported_and_skipped() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("broken.info.gz"), b"garbage").unwrap();
    write_manual(temp.path(), "ok.info", "Misc", "* ok: (ok).");

    indexinfo()
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("broken.info.gz"));

    let index = fs::read_to_string(temp.path().join("dir")).unwrap();
    assert!(index.ends_with("\nMisc\n* ok: (ok).\n"));
}

#[test]
fn json_report_describes_the_run() {
    let temp = tempdir().unwrap();
    write_manual(temp.path(), "a.info", "Shared", "* a: (a).");
    write_manual(temp.path(), "b.info", "Shared", "* b: (b).");

    let output = indexinfo()
        .arg("--json")
        .arg("--sort")
        .arg(temp.path())
        .output()
        .expect("command run");
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(report["outcome"]["status"], "written");
    assert_eq!(report["outcome"]["sections"], 1);
    assert_eq!(report["outcome"]["entries"], 2);
    assert_eq!(report["stats"]["files_parsed"], 2);

    let index = fs::read_to_string(temp.path().join("dir")).unwrap();
    assert!(index.ends_with("\nShared\n* a: (a).\n* b: (b).\n"));
}

#[test]
fn custom_output_name_is_honoured() {
    let temp = tempdir().unwrap();
    write_manual(temp.path(), "a.info", "Misc", "* a: (a).");

    indexinfo()
        .args(["--output-name", "dir.new"])
        .arg(temp.path())
        .assert()
        .success();

    assert!(temp.path().join("dir.new").exists());
    assert!(!temp.path().join("dir").exists());
}
