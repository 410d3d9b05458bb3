mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("weo").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("weo"))
        .stdout(predicate::str::contains("plot"));
}

#[test]
fn lists_regions_and_members() {
    Command::cargo_bin("weo")
        .unwrap()
        .arg("regions")
        .assert()
        .success()
        .stdout(predicate::str::contains("BRICS Countries"));

    Command::cargo_bin("weo")
        .unwrap()
        .args(["regions", "Northern America"])
        .assert()
        .success()
        .stdout(predicate::str::diff("CAN,USA\n"));

    Command::cargo_bin("weo")
        .unwrap()
        .args(["regions", "Atlantis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown region"));
}

#[test]
fn lists_countries_and_subjects() {
    let dir = tempdir().unwrap();
    let (weo, refs) = common::write_fixture(dir.path());

    Command::cargo_bin("weo")
        .unwrap()
        .args(["countries", "--data"])
        .arg(&weo)
        .arg("--ref")
        .arg(&refs)
        .assert()
        .success()
        .stdout(predicate::str::contains("VEN\tVenezuela, RB"))
        .stdout(predicate::str::contains("International").not());

    Command::cargo_bin("weo")
        .unwrap()
        .args(["subjects", "--data"])
        .arg(&weo)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "BCA\tCurrent account balance as U.S. dollars (BCA)",
        ));
}

#[test]
fn plot_writes_svg_export_and_stats() {
    let dir = tempdir().unwrap();
    let (weo, refs) = common::write_fixture(dir.path());
    let svg = dir.path().join("chart.svg");
    let export = dir.path().join("rows.csv");

    Command::cargo_bin("weo")
        .unwrap()
        .arg("plot")
        .arg("--data")
        .arg(&weo)
        .arg("--ref")
        .arg(&refs)
        .args(["--subject", "BCA", "--countries", "ven;usa", "--to", "1990", "--stats"])
        .arg("--out")
        .arg(&svg)
        .arg("--export")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("VEN • BCA  count=2 missing=9"))
        .stdout(predicate::str::contains("min=-200 max=-100 mean=-150"));

    let text = fs::read_to_string(&svg).unwrap();
    assert!(text.contains("Current account balance (BCA)"));
    let rows = fs::read_to_string(&export).unwrap();
    assert_eq!(rows.lines().count(), 1 + 3);
    assert!(rows.contains("VEN,\"Venezuela, RB\",BCA,1990,-200"));
}

#[test]
fn plot_bottom_selects_lowest() {
    let dir = tempdir().unwrap();
    let (weo, _) = common::write_fixture(dir.path());
    let svg = dir.path().join("bottom.svg");

    Command::cargo_bin("weo")
        .unwrap()
        .arg("plot")
        .arg("--data")
        .arg(&weo)
        .args(["--bottom", "--stats", "--locale", "de"])
        .arg("--out")
        .arg(&svg)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("VEN"));
    assert!(svg.exists());
}

#[test]
fn plot_unknown_subject_fails() {
    let dir = tempdir().unwrap();
    let (weo, _) = common::write_fixture(dir.path());

    Command::cargo_bin("weo")
        .unwrap()
        .arg("plot")
        .arg("--data")
        .arg(&weo)
        .args(["--subject", "NOPE"])
        .arg("--out")
        .arg(dir.path().join("x.svg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown subject 'NOPE'"));
}

#[test]
fn missing_column_names_the_column() {
    let dir = tempdir().unwrap();
    let bad = dir.path().join("bad.tsv");
    fs::write(&bad, "ISO\tCountry\nVEN\tVenezuela\n").unwrap();

    Command::cargo_bin("weo")
        .unwrap()
        .args(["countries", "--data"])
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("WEO Subject Code"));
}
