use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const DATASET: &str = r#"{
  "currentBalance": 120,
  "transactions": [
    {"amount": 3000, "type": "income", "date": "2024-04-01"},
    {"amount": 2970, "type": "expense", "date": "2024-04-05"}
  ],
  "recurring": [
    {"description": "Rent", "amount": 900, "categoryType": "expense",
     "frequency": "monthly", "nextDate": "2024-04-03", "isActive": true},
    {"description": "Salary", "amount": 1500, "categoryType": "income",
     "frequency": "monthly", "nextDate": "2024-04-25", "isActive": true}
  ],
  "scenarios": [
    {"description": "New laptop", "amount": 1100, "type": "expense",
     "date": "2024-05-06", "frequency": "once"}
  ]
}"#;

fn workspace() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    std::fs::write(&input, DATASET).expect("write dataset");
    (dir, input)
}

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cashflow_cli").expect("binary");
    cmd.env("CASHFLOW_HOME", home.path().join("home"))
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn forecast_prints_table_and_summary() {
    let (dir, input) = workspace();
    cli(&dir)
        .args(["forecast", input.to_str().unwrap(), "--days", "10", "--today", "2024-05-01"])
        .assert()
        .success()
        .stdout(contains("=== Forecast ==="))
        .stdout(contains("2024-05-03"))
        .stdout(contains("-777.00"))
        .stdout(contains("Goes negative"));
}

#[test]
fn forecast_json_is_machine_readable() {
    let (dir, input) = workspace();
    let output = cli(&dir)
        .args([
            "forecast",
            input.to_str().unwrap(),
            "--days",
            "3",
            "--today",
            "2024-05-01",
            "--json",
        ])
        .output()
        .expect("run");
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["baseline"].as_array().map(|a| a.len()), Some(4));
    assert_eq!(report["baseline"][0]["kind"], "current");
    assert!(report.get("comparison").is_none());
}

#[test]
fn simulate_shows_comparison_and_writes_report() {
    let (dir, input) = workspace();
    let out = dir.path().join("report.json");
    cli(&dir)
        .args([
            "simulate",
            input.to_str().unwrap(),
            "--days",
            "10",
            "--today",
            "2024-05-01",
            "--out",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("Baseline vs scenario"))
        .stdout(contains("-1100.00"));
    let saved = std::fs::read_to_string(&out).expect("report saved");
    assert!(saved.contains("\"comparison\""));
}

#[test]
fn schedule_lists_rule_status() {
    let (dir, input) = workspace();
    cli(&dir)
        .args(["schedule", input.to_str().unwrap(), "--days", "30", "--today", "2024-05-01"])
        .assert()
        .success()
        .stdout(contains("Rent"))
        .stdout(contains("overdue"))
        .stdout(contains("2024-05-25"));
}

#[test]
fn malformed_input_fails_with_validation_error() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("bad.json");
    std::fs::write(&input, r#"{"transactions": [{"type": "income", "date": "2024-01-01"}]}"#)
        .expect("write");
    cli(&dir)
        .args(["forecast", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("Error: Invalid input record").and(contains("amount")));
}

#[test]
fn horizon_past_the_calendar_is_an_error() {
    let (dir, input) = workspace();
    cli(&dir)
        .args(["forecast", input.to_str().unwrap(), "--days", "4294967295"])
        .assert()
        .failure()
        .stderr(contains("Error: Invalid horizon").and(contains("exceeds the calendar")));
}

#[test]
fn oversized_due_soon_window_in_config_is_reported() {
    let (dir, input) = workspace();
    let home = dir.path().join("home");
    std::fs::create_dir_all(&home).expect("home dir");
    std::fs::write(home.join("config.json"), r#"{"dueSoonDays": 1000000000}"#)
        .expect("write config");
    cli(&dir)
        .args(["schedule", input.to_str().unwrap(), "--today", "2024-05-01"])
        .assert()
        .failure()
        .stderr(contains("Configuration error").and(contains("dueSoonDays")));
}

#[test]
fn unknown_command_prints_usage() {
    let dir = TempDir::new().expect("tempdir");
    cli(&dir)
        .arg("explode")
        .assert()
        .failure()
        .stderr(contains("unknown command").and(contains("Usage: cashflow_cli")));
}

#[test]
fn config_init_writes_defaults() {
    let dir = TempDir::new().expect("tempdir");
    cli(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(contains("Configuration written"));
    cli(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("\"lookbackMonths\": 6"));
}
