use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

fn statlens() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("statlens")
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_describe_text() {
    statlens()
        .args(["describe", "--x", "1, 2; 3\t4 5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample X (n = 5)"))
        .stdout(predicate::str::contains("3.0000"))
        .stdout(predicate::str::contains("Histogram"))
        .stdout(predicate::str::contains("Box plot"));
}

#[test]
fn test_describe_json() {
    let output = statlens()
        .args(["describe", "--x", "2 4 4 6", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["stats"]["count"], 4);
    assert_eq!(json["stats"]["mean"], 4.0);
    assert_eq!(json["stats"]["mode"]["kind"], "unique");
    assert_eq!(json["box_plot"]["status"], "ready");
}

#[test]
fn test_describe_reads_stdin() {
    statlens()
        .arg("describe")
        .write_stdin("10\n20\n30\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample X (n = 3)"))
        .stdout(predicate::str::contains("20.0000"));
}

#[test]
fn test_describe_frequencies() {
    statlens()
        .args(["describe", "--x", "1 1 2", "--frequencies"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Frequency table (2 distinct values)"));
}

#[test]
fn test_describe_rejects_bad_token() {
    statlens()
        .args(["describe", "--x", "1 2 abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sample X: 'abc' is not a valid number"));
}

#[test]
fn test_describe_rejects_empty_sample() {
    statlens()
        .args(["describe", "--x", " , "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sample X is empty"));
}

#[test]
fn test_negative_values_on_command_line() {
    statlens()
        .args(["describe", "--x", "-3 -1 1 3", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 4"));
}

#[test]
fn test_regress_with_predictions() {
    statlens()
        .args([
            "regress",
            "--x",
            "1 2 3 4 5",
            "--y",
            "5 7 9 11 13",
            "--predict",
            "10,-1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ŷ = 3.0000 + 2.0000X"))
        .stdout(predicate::str::contains("23.0000"))
        .stdout(predicate::str::contains("1.0000"));
}

#[test]
fn test_regress_requires_y() {
    statlens()
        .args(["regress", "--x", "1 2 3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("A Y sample is required"));
}

#[test]
fn test_regress_degenerate_json() {
    let output = statlens()
        .args(["regress", "--x", "2 2 2", "--y", "1 2 3", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert!(json["regression"]["slope"].is_null());
    assert_eq!(
        json["regression"]["equation"],
        "Cannot calculate (denominator for slope is zero)"
    );
}

#[test]
fn test_regress_constant_x_is_degenerate() {
    statlens()
        .args(["regress", "--x", "0.3 0.3 0.3", "--y", "1 2 3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Cannot calculate (denominator for slope is zero)",
        ))
        .stdout(predicate::str::contains("Slope").not());
}

#[test]
fn test_regress_mismatched_lengths_fails() {
    statlens()
        .args(["regress", "--x", "1 2 3", "--y", "1 2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("different lengths"));
}

#[test]
fn test_analyze_mismatched_lengths_degrades() {
    let output = statlens()
        .args(["analyze", "--x", "1 2 3", "--y", "1 2 3 4 5", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["x"]["status"], "ready");
    assert_eq!(json["y"]["status"], "ready");
    assert_eq!(json["regression"]["status"], "unavailable");
    assert_eq!(json["scatter"]["status"], "unavailable");
}

#[test]
fn test_analyze_text_with_bad_x() {
    statlens()
        .args(["analyze", "--x", "oops", "--y", "1 2 3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unavailable: sample X: 'oops' is not a valid number"))
        .stdout(predicate::str::contains("Sample Y (n = 3)"))
        .stdout(predicate::str::contains("both samples are required"));
}

#[test]
fn test_analyze_reads_files_and_writes_output() {
    let tmp_dir = TempDir::new().unwrap();
    let x_path = tmp_dir.path().join("x.txt");
    let y_path = tmp_dir.path().join("y.csv");
    let out_path = tmp_dir.path().join("report.json");
    fs::write(&x_path, "1\n2\n3\n4\n").unwrap();
    fs::write(&y_path, "2,4,6,8").unwrap();

    statlens()
        .arg("analyze")
        .arg("--x-file")
        .arg(&x_path)
        .arg("--y-file")
        .arg(&y_path)
        .args(["--format", "json", "--output"])
        .arg(&out_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let report = fs::read_to_string(&out_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(json["regression"]["status"], "ready");
    assert_eq!(json["scatter"]["value"].as_array().unwrap().len(), 4);
}

#[test]
fn test_config_file_and_overrides() {
    let tmp_dir = TempDir::new().unwrap();
    let config_path = tmp_dir.path().join("config.json");
    fs::write(&config_path, r#"{"max_values": 3, "quantiles": [0.5]}"#).unwrap();

    statlens()
        .args(["describe", "--x", "1 2 3 4"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than the limit of 3"));

    statlens()
        .args(["describe", "--x", "1 2 3 4", "--max-values", "10"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("p = 0.5"));
}

#[test]
fn test_both_samples_from_stdin_rejected() {
    statlens()
        .args(["analyze", "--x-file", "-", "--y-file", "-"])
        .write_stdin("1 2 3")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot both be read from stdin"));
}
