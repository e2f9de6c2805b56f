use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

#[test]
fn objects_writes_csv_and_prints_summary() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("config.txt");
    let output = dir.path().join("objects.csv");
    fs::write(
        &input,
        "object network WEB01\n host 10.0.0.5\n description primary web server\n\
         object-group network WEB_FARM\n network-object object WEB01\n network-object object WEB02\n",
    )
    .expect("write input");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("asa-export"));
    cmd.arg("objects")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Processed 2 objects, output written to",
        ));

    let csv = fs::read_to_string(&output).expect("read output");
    assert!(csv.starts_with(
        "Context Name,Object Name,Object Type,Object Value,Object Description,Reference"
    ));
    assert!(csv.contains("System,WEB01,host,10.0.0.5,primary web server,1"));
    assert!(csv.contains("System,WEB_FARM,network-group,WEB01; WEB02,,4"));
}

#[test]
fn objects_json_format_serializes_records() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("config.txt");
    let output = dir.path().join("objects.json");
    fs::write(
        &input,
        "object-group service WEB_PORTS tcp\n port-object eq 80\n port-object range 8000 8100\n",
    )
    .expect("write input");

    Command::new(assert_cmd::cargo::cargo_bin!("asa-export"))
        .arg("objects")
        .arg(&input)
        .arg(&output)
        .arg("--format")
        .arg("json")
        .assert()
        .success();

    let objects: Value = serde_json::from_str(&fs::read_to_string(&output).expect("read output"))
        .expect("json parse");
    let object = &objects.as_array().expect("array")[0];
    assert_eq!(object["kind"], "service-group-tcp");
    assert_eq!(object["value"], serde_json::json!(["80", "8000-8100"]));
    assert_eq!(object["reference"], 1);
}

#[test]
fn objects_with_missing_input_fails() {
    let dir = tempdir().expect("tempdir");

    Command::new(assert_cmd::cargo::cargo_bin!("asa-export"))
        .arg("objects")
        .arg(dir.path().join("missing.txt"))
        .arg(dir.path().join("objects.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn unknown_subcommand_prints_usage() {
    Command::new(assert_cmd::cargo::cargo_bin!("asa-export"))
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
