use std::path::Path;
use std::process::Command;

use chrono::{Duration, Local};
use serde_json::Value;
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_todoq"))
}

fn add(file: &Path, description: &str, args: &[&str]) {
    let output = bin()
        .arg("--file")
        .arg(file)
        .arg("add")
        .arg(description)
        .args(args)
        .output()
        .expect("add");
    assert!(
        output.status.success(),
        "add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn list_json(file: &Path, args: &[&str]) -> Value {
    let output = bin()
        .arg("--file")
        .arg(file)
        .arg("list")
        .args(args)
        .arg("--json")
        .output()
        .expect("list");
    assert!(
        output.status.success(),
        "list failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json")
}

#[test]
fn add_then_list_round_trips() {
    let temp = TempDir::new().expect("tempdir");
    let file = temp.path().join("tasks.json");
    let today = Local::now().date_naive();

    add(
        &file,
        "Submit expense report",
        &["--due", &today.to_string(), "--priority", "high"],
    );
    add(&file, "Water plants", &["--priority", "l"]);

    let tasks = list_json(&file, &["--all"]);
    let tasks = tasks.as_array().expect("array");
    assert_eq!(tasks.len(), 2);
    // High priority sorts first.
    assert_eq!(tasks[0]["description"], "Submit expense report");
    assert_eq!(tasks[0]["priority"], "high");
    assert_eq!(tasks[0]["due_date"], today.to_string().as_str());
    assert_eq!(tasks[1]["priority"], "low");
    assert!(tasks[1].get("due_date").is_none());
}

#[test]
fn add_rejects_invalid_dates_and_priorities() {
    let temp = TempDir::new().expect("tempdir");
    let file = temp.path().join("tasks.json");

    let bad_date = bin()
        .arg("--file")
        .arg(&file)
        .args(["add", "Pay rent", "--due", "tomorrow"])
        .output()
        .expect("run");
    assert!(!bad_date.status.success());
    assert!(String::from_utf8_lossy(&bad_date.stderr).contains("invalid date"));

    let bad_priority = bin()
        .arg("--file")
        .arg(&file)
        .args(["add", "Pay rent", "--priority", "urgent"])
        .output()
        .expect("run");
    assert!(!bad_priority.status.success());

    // Nothing was written.
    assert!(list_json(&file, &["--all"]).as_array().expect("array").is_empty());
}

#[test]
fn overdue_and_due_soon_filters_select_by_date() {
    let temp = TempDir::new().expect("tempdir");
    let file = temp.path().join("tasks.json");
    let today = Local::now().date_naive();
    let yesterday = (today - Duration::days(1)).to_string();
    let in_two_days = (today + Duration::days(2)).to_string();
    let next_month = (today + Duration::days(40)).to_string();

    add(&file, "Late task", &["--due", &yesterday]);
    add(&file, "Soon task", &["--due", &in_two_days]);
    add(&file, "Far task", &["--due", &next_month]);
    add(&file, "Undated task", &[]);

    let overdue = list_json(&file, &["--overdue"]);
    let descriptions: Vec<&str> = overdue
        .as_array()
        .expect("array")
        .iter()
        .map(|t| t["description"].as_str().expect("str"))
        .collect();
    assert_eq!(descriptions, vec!["Late task"]);

    let due_soon = list_json(&file, &["--due-soon"]);
    let descriptions: Vec<&str> = due_soon
        .as_array()
        .expect("array")
        .iter()
        .map(|t| t["description"].as_str().expect("str"))
        .collect();
    assert_eq!(descriptions, vec!["Soon task"]);

    let no_date = list_json(&file, &["--no-date"]);
    let descriptions: Vec<&str> = no_date
        .as_array()
        .expect("array")
        .iter()
        .map(|t| t["description"].as_str().expect("str"))
        .collect();
    assert_eq!(descriptions, vec!["Undated task"]);
}

#[test]
fn default_list_shows_today_and_undated_only() {
    let temp = TempDir::new().expect("tempdir");
    let file = temp.path().join("tasks.json");
    let today = Local::now().date_naive();
    let next_week = (today + Duration::days(5)).to_string();

    add(&file, "Due today", &["--due", &today.to_string()]);
    add(&file, "Later this week", &["--due", &next_week]);
    add(&file, "Undated", &[]);

    let tasks = list_json(&file, &[]);
    let descriptions: Vec<&str> = tasks
        .as_array()
        .expect("array")
        .iter()
        .map(|t| t["description"].as_str().expect("str"))
        .collect();
    assert_eq!(descriptions, vec!["Due today", "Undated"]);

    let week = list_json(&file, &["--week"]);
    assert_eq!(week.as_array().expect("array").len(), 3);
}

#[test]
fn insights_report_counts_tasks() {
    let temp = TempDir::new().expect("tempdir");
    let file = temp.path().join("tasks.json");
    let today = Local::now().date_naive();
    let yesterday = (today - Duration::days(1)).to_string();

    add(&file, "Late task", &["--due", &yesterday, "--priority", "high"]);
    add(&file, "Open task", &[]);

    let output = bin()
        .arg("--file")
        .arg(&file)
        .args(["list", "--insights", "--json"])
        .output()
        .expect("insights");
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["total"], 2);
    assert_eq!(report["pending"], 2);
    assert_eq!(report["overdue"], 1);
    assert_eq!(report["high_pending"], 1);
    assert_eq!(report["upcoming_deadlines"], 0);
    // 0 completed, one overdue (-20), one pending high (-10).
    assert_eq!(report["health_score"], 0);
}

#[test]
fn list_footer_describes_the_listed_tasks() {
    let temp = TempDir::new().expect("tempdir");
    let file = temp.path().join("tasks.json");
    let today = Local::now().date_naive();
    let yesterday = (today - Duration::days(1)).to_string();

    add(&file, "Late task", &["--due", &yesterday]);
    add(&file, "Today task", &["--due", &today.to_string()]);

    // The default view hides the late task, so the footer must not count it.
    let output = bin()
        .arg("--file")
        .arg(&file)
        .arg("list")
        .output()
        .expect("list");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("💡 0 overdue, 1 due soon"));

    let output = bin()
        .arg("--file")
        .arg(&file)
        .args(["list", "--all"])
        .output()
        .expect("list all");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("💡 1 overdue, 1 due soon"));

    // Special filters already say what they show; no footer.
    let output = bin()
        .arg("--file")
        .arg(&file)
        .args(["list", "--overdue"])
        .output()
        .expect("list overdue");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Late task"));
    assert!(!stdout.contains("💡"));
}
