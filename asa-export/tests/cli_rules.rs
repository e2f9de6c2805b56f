use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

#[test]
fn rules_writes_csv_and_prints_summary() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("config.txt");
    let output = dir.path().join("acls.csv");
    fs::write(
        &input,
        "hostname FW1\n\
         access-list OUTSIDE remark Allow web traffic\n\
         access-list OUTSIDE extended permit tcp object-group WEBSERVERS host 10.0.0.5 eq 443 log\n",
    )
    .expect("write input");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("asa-export"));
    cmd.arg("rules")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Processed 1 ACL entries, output written to",
        ));

    let csv = fs::read_to_string(&output).expect("read output");
    assert!(csv.starts_with(
        "Context_name,name_of_Access_List,Action,Type,Source,Destination,Log,Remark"
    ));
    assert!(csv.contains("FW1,OUTSIDE,permit,tcp,WEBSERVERS,10.0.0.5,log,Allow web traffic"));
}

#[test]
fn rules_json_format_serializes_entries() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("config.txt");
    let output = dir.path().join("acls.json");
    fs::write(
        &input,
        "access-list A extended deny udp any any\n",
    )
    .expect("write input");

    Command::new(assert_cmd::cargo::cargo_bin!("asa-export"))
        .arg("rules")
        .arg(&input)
        .arg(&output)
        .arg("--format")
        .arg("json")
        .assert()
        .success();

    let entries: Value = serde_json::from_str(&fs::read_to_string(&output).expect("read output"))
        .expect("json parse");
    let entry = &entries.as_array().expect("array")[0];
    assert_eq!(entry["context"], "System");
    assert_eq!(entry["action"], "deny");
    assert_eq!(entry["log"], "no");
}

#[test]
fn rules_with_missing_input_fails_without_output() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("acls.csv");

    Command::new(assert_cmd::cargo::cargo_bin!("asa-export"))
        .arg("rules")
        .arg(dir.path().join("missing.txt"))
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));

    assert!(!output.exists());
}

#[test]
fn rules_without_both_paths_prints_usage() {
    Command::new(assert_cmd::cargo::cargo_bin!("asa-export"))
        .arg("rules")
        .arg("only-one-arg.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
