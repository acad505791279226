#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn loansim(db_path: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("loansim"));
    cmd.arg("--db-path").arg(db_path);
    cmd
}

fn save_simulation(db_path: &Path, first_name: &str, last_name: &str) -> u64 {
    let output = loansim(db_path)
        .args([
            "loan",
            "--amount",
            "250000",
            "--years",
            "20",
            "--age",
            "ADULT",
            "--profession",
            "EMPLOYEE",
            "--income",
            "3500",
            "--save",
            "--first-name",
            first_name,
            "--last-name",
            last_name,
        ])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    body["id"].as_u64().expect("saved simulations report their id")
}

#[test]
fn test_history_survives_restarts() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. Two separate runs save one simulation each
    assert_eq!(save_simulation(&db_path, "Jane", "Doe"), 1);
    assert_eq!(save_simulation(&db_path, "John", "Smith"), 2);

    // 2. A third run lists both, newest first
    let output = loansim(&db_path)
        .arg("history")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    let history: Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["client_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["John Smith", "Jane Doe"]);
    assert_eq!(history[1]["monthly_payment"], "1206.36");

    // 3. CSV export carries the same rows
    loansim(&db_path)
        .args(["history", "--format", "csv", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id,client_name,age_category"))
        .stdout(predicate::str::contains("John Smith"))
        .stdout(predicate::str::contains("Jane Doe").not());
}

#[test]
fn test_show_and_delete_across_runs() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    let id = save_simulation(&db_path, "Jane", "Doe");

    loansim(&db_path)
        .args(["show", &id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Doe"));

    loansim(&db_path)
        .args(["delete", &id.to_string()])
        .assert()
        .success();

    loansim(&db_path)
        .args(["show", &id.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No simulation found with id 1"));

    // ids are not handed out twice
    assert_eq!(save_simulation(&db_path, "Jane", "Doe"), 2);
}

#[test]
fn test_history_persists_without_explicit_db_path() {
    let dir = tempdir().unwrap();

    let output = Command::new(cargo_bin!("loansim"))
        .current_dir(dir.path())
        .args([
            "loan",
            "--amount",
            "100000",
            "--years",
            "10",
            "--rate",
            "1.0",
            "--age",
            "SENIOR",
            "--profession",
            "RETIRED",
            "--income",
            "2800",
            "--save",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
        ])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    let id = body["id"].as_u64().unwrap();

    Command::new(cargo_bin!("loansim"))
        .current_dir(dir.path())
        .args(["show", &id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace"));

    assert!(dir.path().join("loansim.db").exists());
}
