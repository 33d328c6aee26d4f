use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_the_flags() {
    Command::cargo_bin("plotctl")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--endpoint"))
        .stdout(predicate::str::contains("--data"))
        .stdout(predicate::str::contains("--log"));
}

#[test]
fn version_is_printed() {
    Command::cargo_bin("plotctl")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_data_file_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.dat");

    Command::cargo_bin("plotctl")
        .unwrap()
        .arg("--data")
        .arg(&missing)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Data file not found"));
}

#[test]
fn degenerate_surface_is_rejected() {
    for flag in ["--width=0", "--width=NaN", "--height=inf"] {
        Command::cargo_bin("plotctl")
            .unwrap()
            .arg(flag)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Surface size must be a finite number"));
    }
}

#[test]
fn unknown_flag_is_a_usage_error() {
    Command::cargo_bin("plotctl")
        .unwrap()
        .arg("--colour")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
