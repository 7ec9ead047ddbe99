use assert_cmd::Command;
use predicates::prelude::*;

// These tests only exercise argument handling and the run-fatal input
// path; nothing here touches the network.

#[test]
fn missing_required_arguments() {
    let mut cmd = Command::cargo_bin("genome-fetch").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--input"))
        .stderr(predicate::str::contains("--outdir"));
}

#[test]
fn unreadable_input_is_fatal_with_exit_code_2() {
    let temp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("genome-fetch").unwrap();
    cmd.arg("-i")
        .arg(temp.path().join("does-not-exist.tsv"))
        .arg("-o")
        .arg(temp.path().join("out"));
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("failed to read input file"));
}

#[test]
fn unwritable_output_directory_reports_filesystem_error() {
    // Comment-only input resolves to zero accessions, so the run reaches
    // output-directory creation without any network traffic.
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("input.tsv");
    std::fs::write(&input, "# only comments here\n").unwrap();
    let blocker = temp.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let mut cmd = Command::cargo_bin("genome-fetch").unwrap();
    cmd.arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(blocker.join("out"));
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("create output dir"));
}

#[test]
fn negative_delay_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("input.tsv");
    std::fs::write(&input, "GCF_000001.1\tOrganismA\n").unwrap();
    let mut cmd = Command::cargo_bin("genome-fetch").unwrap();
    cmd.arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(temp.path().join("out"))
        .arg("--delay=-1");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("non-negative"));
}
