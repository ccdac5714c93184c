//! End-to-end tests for the `ala` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;


const ACCESS_LOG: &str = r#"10.0.0.1 - - [15/Jan/2024:08:00:00 +0000] "GET /index.html HTTP/1.1" 200 512
10.0.0.2 - - [15/Jan/2024:08:05:00 +0000] "GET /index.html HTTP/1.1" 200 512
10.0.0.3 - - [15/Jan/2024:09:00:00 +0000] "GET /about.html?ref=home HTTP/1.1" 200 128
10.0.0.4 - - [15/Jan/2024:09:30:00 +0000] "GET /missing HTTP/1.1" 404 0
this line is not a request
10.0.0.1 - - [16/Jan/2024:10:00:00 +0000] "GET /index.html HTTP/1.1" 304 0
"#;


fn ala(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ala").unwrap();
    cmd.env_remove("RUST_LOG").arg("--db").arg(db_path);
    cmd
}

fn write_log(dir: &TempDir) -> std::path::PathBuf {
    let log_path = dir.path().join("access.log");
    fs::write(&log_path, ACCESS_LOG).unwrap();
    log_path
}


#[test]
fn test_no_subcommand_prints_help() {
    Command::cargo_bin("ala")
        .unwrap()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_report_without_database() {
    let tmp_dir = TempDir::new().unwrap();

    ala(&tmp_dir.path().join("records.db"))
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("No record database found"));
}

#[test]
fn test_update_then_report_day() {
    let tmp_dir = TempDir::new().unwrap();
    let db_path = tmp_dir.path().join("records.db");
    let log_path = write_log(&tmp_dir);

    ala(&db_path)
        .arg("update")
        .arg(&log_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed 5 requests"));

    let output = ala(&db_path)
        .args(["report", "--period", "2024-01-15", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        rows,
        serde_json::json!([
            {"record_date": "2024-01-15", "resource": "/index.html", "record_count": 2},
            {"record_date": "2024-01-15", "resource": "/about.html", "record_count": 1},
        ])
    );
}

#[test]
fn test_report_by_granularity_with_limit() {
    let tmp_dir = TempDir::new().unwrap();
    let db_path = tmp_dir.path().join("records.db");
    let log_path = write_log(&tmp_dir);

    ala(&db_path).arg("update").arg(&log_path).assert().success();

    let output = ala(&db_path)
        .args(["report", "--granularity", "day", "--limit", "2", "--json"])
        .output()
        .unwrap();

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        rows,
        serde_json::json!([
            {"record_date": "2024-01-16", "resource": "/index.html", "record_count": 1},
            {"record_date": "2024-01-15", "resource": "/index.html", "record_count": 2},
        ])
    );
}

#[test]
fn test_update_is_idempotent() {
    let tmp_dir = TempDir::new().unwrap();
    let db_path = tmp_dir.path().join("records.db");
    let log_path = write_log(&tmp_dir);

    ala(&db_path).arg("update").arg(&log_path).assert().success();
    ala(&db_path)
        .arg("update")
        .arg("--atomic-upsert")
        .arg(&log_path)
        .assert()
        .success();

    let output = ala(&db_path)
        .args(["report", "--period", "2024", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        rows,
        serde_json::json!([
            {"record_date": "2024", "resource": "/index.html", "record_count": 3},
            {"record_date": "2024", "resource": "/about.html", "record_count": 1},
        ])
    );
}

#[test]
fn test_prune_drops_other_days() {
    let tmp_dir = TempDir::new().unwrap();
    let db_path = tmp_dir.path().join("records.db");
    let log_path = write_log(&tmp_dir);

    ala(&db_path).arg("update").arg(&log_path).assert().success();

    ala(&db_path)
        .args(["prune", "2024-01-16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pruned 2 stale records"));

    let output = ala(&db_path)
        .args(["report", "--granularity", "day", "--json"])
        .output()
        .unwrap();
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);

    let output = ala(&db_path)
        .args(["report", "--period", "2024-01", "--json"])
        .output()
        .unwrap();
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
}

#[test]
fn test_update_missing_log_files_fails() {
    let tmp_dir = TempDir::new().unwrap();

    ala(&tmp_dir.path().join("records.db"))
        .arg("update")
        .assert()
        .failure();
}
