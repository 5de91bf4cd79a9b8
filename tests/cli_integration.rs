//! Integration tests for the `itin` CLI.
//!
//! Each test writes an items file into a temp directory, runs `itin` as a
//! subprocess, and verifies stdout and exit status.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Get the path to the built `itin` binary.
fn itin_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("itin");
    path
}

fn write_items(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("items.json");
    fs::write(&path, json).unwrap();
    path
}

const SAMPLE_ITEMS: &str = r#"[
  {"id": "f1", "title": "Flight to Lisbon", "activityType": "flight",
   "scheduledDate": "2024-06-01", "scheduledTime": "09:30"},
  {"id": "f1-seat", "title": "Pick seats", "parent": "f1"},
  {"id": "d1", "title": "Dinner at Ramiro", "activityType": "dining",
   "scheduledDate": "2024-06-01", "scheduledTime": "20:00"},
  {"id": "note", "title": "Pack chargers"},
  {"id": "lost", "title": "Confirm pickup", "parent": "gone"}
]"#;

// ---------------------------------------------------------------------------
// by-type
// ---------------------------------------------------------------------------

#[test]
fn by_type_text_output() {
    let tmp = TempDir::new().unwrap();
    let items = write_items(tmp.path(), SAMPLE_ITEMS);

    let output = Command::new(itin_bin())
        .arg("by-type")
        .arg(&items)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    // essentials before experiences
    let flights = stdout.find("Flights").unwrap();
    let dining = stdout.find("Dining").unwrap();
    assert!(flights < dining);
    // child follows its root's group
    assert!(stdout.contains("f1-seat Pick seats"));
    // orphan and untyped items land in the ungrouped section
    assert!(stdout.contains("-- Ungrouped --"));
    assert!(stdout.contains("lost Confirm pickup"));
    assert!(stdout.contains("[orphan]"));
}

#[test]
fn by_type_json_output() {
    let tmp = TempDir::new().unwrap();
    let items = write_items(tmp.path(), SAMPLE_ITEMS);

    let output = Command::new(itin_bin())
        .arg("by-type")
        .arg(&items)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let groups = parsed["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["key"], "flight");
    assert_eq!(groups[0]["items"].as_array().unwrap().len(), 2);
    let ungrouped = parsed["ungrouped"].as_array().unwrap();
    assert_eq!(ungrouped.len(), 2);
}

#[test]
fn by_type_no_orphans_flag() {
    let tmp = TempDir::new().unwrap();
    let items = write_items(tmp.path(), SAMPLE_ITEMS);

    let output = Command::new(itin_bin())
        .arg("by-type")
        .arg(&items)
        .arg("--no-orphans")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("lost Confirm pickup"));
}

#[test]
fn by_type_reads_stdin() {
    let output = Command::new(itin_bin())
        .arg("by-type")
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            use std::io::Write;
            child
                .stdin
                .as_mut()
                .unwrap()
                .write_all(SAMPLE_ITEMS.as_bytes())?;
            child.wait_with_output()
        })
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Flights"));
}

// ---------------------------------------------------------------------------
// by-date
// ---------------------------------------------------------------------------

#[test]
fn by_date_text_output() {
    let tmp = TempDir::new().unwrap();
    let items = write_items(tmp.path(), SAMPLE_ITEMS);

    let output = Command::new(itin_bin())
        .arg("by-date")
        .arg(&items)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("== 2024-06-01 =="));
    assert!(stdout.contains("-- Morning --"));
    assert!(stdout.contains("-- Evening --"));
    // the child inherits its root's slot and schedule
    assert!(stdout.contains("f1-seat Pick seats @ 09:30 [inherited]"));
    assert!(stdout.contains("== Unscheduled =="));
}

#[test]
fn by_date_json_output() {
    let tmp = TempDir::new().unwrap();
    let items = write_items(tmp.path(), SAMPLE_ITEMS);

    let output = Command::new(itin_bin())
        .arg("by-date")
        .arg(&items)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8(output.stdout).unwrap()).unwrap();

    let buckets = parsed["groups"].as_array().unwrap();
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0]["date"], "2024-06-01");
    let morning = buckets[0]["morning"]["items"].as_array().unwrap();
    assert_eq!(morning.len(), 2);
    assert_eq!(morning[1]["inherited_schedule"], true);
    // unscheduled carries the untyped note and the orphan
    assert_eq!(parsed["unscheduled"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_reports_problems_and_fails() {
    let tmp = TempDir::new().unwrap();
    let items = write_items(tmp.path(), SAMPLE_ITEMS);

    let output = Command::new(itin_bin())
        .arg("check")
        .arg(&items)
        .output()
        .unwrap();
    // dangling parent is an error
    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("dangling parent"));
}

#[test]
fn check_clean_list_succeeds() {
    let tmp = TempDir::new().unwrap();
    let items = write_items(
        tmp.path(),
        r#"[{"id": "a", "title": "Solo", "activityType": "flight"}]"#,
    );

    let output = Command::new(itin_bin())
        .arg("check")
        .arg(&items)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("✓ items are valid"));
}

#[test]
fn check_json_output() {
    let tmp = TempDir::new().unwrap();
    let items = write_items(tmp.path(), SAMPLE_ITEMS);

    let output = Command::new(itin_bin())
        .arg("check")
        .arg(&items)
        .arg("--json")
        .output()
        .unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8(output.stdout).unwrap()).unwrap();
    assert_eq!(parsed["valid"], false);
    assert_eq!(parsed["errors"][0]["type"], "dangling_parent");
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_reorders_categories() {
    let tmp = TempDir::new().unwrap();
    let items = write_items(tmp.path(), SAMPLE_ITEMS);
    let config = tmp.path().join("itin.toml");
    fs::write(
        &config,
        r#"
[grouping]
category_order = ["experiences", "essentials"]
"#,
    )
    .unwrap();

    let output = Command::new(itin_bin())
        .arg("by-type")
        .arg(&items)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let dining = stdout.find("Dining").unwrap();
    let flights = stdout.find("Flights").unwrap();
    assert!(dining < flights);
}

#[test]
fn config_custom_activity_type() {
    let tmp = TempDir::new().unwrap();
    let items = write_items(
        tmp.path(),
        r#"[{"id": "s1", "title": "Beach morning", "activityType": "surf"}]"#,
    );
    let config = tmp.path().join("itin.toml");
    fs::write(
        &config,
        r#"
[[activity_types]]
key = "surf"
label = "Surf lessons"
icon = "~"
category = "experiences"
"#,
    )
    .unwrap();

    let output = Command::new(itin_bin())
        .arg("by-type")
        .arg(&items)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Surf lessons"));
    assert!(stdout.contains("(experiences)"));
}

#[test]
fn missing_config_file_errors() {
    let tmp = TempDir::new().unwrap();
    let items = write_items(tmp.path(), SAMPLE_ITEMS);

    let output = Command::new(itin_bin())
        .arg("by-type")
        .arg(&items)
        .arg("--config")
        .arg("/nonexistent/itin.toml")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error:"));
}

#[test]
fn missing_items_file_errors() {
    let output = Command::new(itin_bin())
        .arg("by-type")
        .arg("/nonexistent/items.json")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("cannot read"));
}
