//! Basic CLI E2E tests.
//!
//! Tests invoke the built `moodlog` binary with HOME pointed at a temporary
//! directory so the user's configuration is never touched.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_moodlog"))
        .args(args)
        .env("HOME", home)
        .env_remove("MOODLOG_ENV")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

const JOURNAL: &str = r#"{
  "items": [
    {"id": "1", "dateTime": "2024-10-20T08:00:00", "rating": 5, "tags": ["walk"], "emotions": ["calm"]},
    {"id": "2", "dateTime": "2024-10-19T08:00:00", "rating": 5, "tags": ["walk"], "emotions": ["calm"]},
    {"id": "3", "dateTime": "2024-10-18T08:00:00", "rating": 4, "tags": ["walk", "work"]},
    {"id": "4", "dateTime": "2024-10-17T08:00:00", "rating": 5, "tags": ["walk"], "text": "sunny"},
    {"id": "5", "dateTime": "2024-10-16T08:00:00", "rating": 2, "tags": ["work"]},
    {"id": "6", "dateTime": "2024-10-15T08:00:00", "rating": 5, "tags": ["walk"]}
  ],
  "tags": [
    {"id": "walk", "title": "Walk", "color": "green"},
    {"id": "work", "title": "Work", "color": "blue"}
  ]
}"#;

fn write_journal(dir: &Path) -> String {
    let path = dir.join("journal.json");
    std::fs::write(&path, JOURNAL).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_stats_compute() {
    let home = tempfile::tempdir().unwrap();
    let input = write_journal(home.path());

    let (code, stdout, _) = run_cli(
        home.path(),
        &["stats", "compute", "--input", &input, "--today", "2024-10-20"],
    );
    assert_eq!(code, 0, "stats compute failed");

    let state: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(state["loaded"], true);
    assert_eq!(state["items_count"], 6);
    assert_eq!(state["mood_avg"]["highest_rating_key"], 5);
    assert_eq!(state["mood_avg"]["highest_rating_percentage"], 67);
}

#[test]
fn test_stats_highlights() {
    let home = tempfile::tempdir().unwrap();
    let input = write_journal(home.path());

    let (code, stdout, _) = run_cli(
        home.path(),
        &["stats", "highlights", "-i", &input, "--today", "2024-10-20"],
    );
    assert_eq!(code, 0, "stats highlights failed");

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let metrics: Vec<&str> = report["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["metric"].as_str().unwrap())
        .collect();
    assert_eq!(
        metrics,
        vec![
            "mood_chart",
            "emotions_distribution",
            "mood_avg",
            "mood_peaks_positive",
            "tags_distribution"
        ]
    );
}

#[test]
fn test_stats_check_with_filter() {
    let home = tempfile::tempdir().unwrap();
    let input = write_journal(home.path());

    let (code, stdout, _) = run_cli(
        home.path(),
        &[
            "stats", "check", "mood_avg", "--input", &input, "--today", "2024-10-20", "--tag",
            "work",
        ],
    );
    assert_eq!(code, 0, "stats check failed");

    let check: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(check["metric"], "mood_avg");
    assert_eq!(check["available"], true);
    assert_eq!(check["highlighted"], false);
}

#[test]
fn test_stats_rejects_bad_input() {
    let home = tempfile::tempdir().unwrap();
    let input = write_journal(home.path());

    let (code, _, stderr) = run_cli(
        home.path(),
        &["stats", "compute", "--input", &input, "--today", "20-10-2024"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid date"));

    let (code, _, stderr) = run_cli(
        home.path(),
        &["stats", "compute", "--input", &input, "--rating", "9"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid rating"));

    let missing = home.path().join("missing.json");
    let (code, _, stderr) = run_cli(
        home.path(),
        &["stats", "compute", "--input", missing.to_str().unwrap()],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Failed to read snapshot"));

    let (code, _, _) = run_cli(home.path(), &["stats", "check", "nope", "--input", &input]);
    assert_ne!(code, 0);
}

#[test]
fn test_sample_is_reproducible() {
    let home = tempfile::tempdir().unwrap();
    let args = ["sample", "--days", "20", "--seed", "42", "--today", "2024-10-20"];

    let (code, first, _) = run_cli(home.path(), &args);
    assert_eq!(code, 0, "sample failed");
    let (_, second, _) = run_cli(home.path(), &args);
    assert_eq!(first, second);

    let out = home.path().join("sample.json");
    let (code, _, stderr) = run_cli(
        home.path(),
        &["sample", "--seed", "42", "--output", out.to_str().unwrap()],
    );
    assert_eq!(code, 0);
    assert!(stderr.contains("wrote"));

    let (code, _, _) = run_cli(
        home.path(),
        &["stats", "highlights", "--input", out.to_str().unwrap()],
    );
    assert_eq!(code, 0);
}

#[test]
fn test_sample_rejects_oversized_history() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(
        home.path(),
        &["sample", "--days", "4294967295", "--today", "2024-10-20"],
    );
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("days must be at most"));
}

#[test]
fn test_config_set_get_reset() {
    let home = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "thresholds.mood_avg_min_items"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "5");

    let (code, stdout, _) = run_cli(
        home.path(),
        &["config", "set", "thresholds.mood_avg_min_items", "2"],
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (_, stdout, _) = run_cli(home.path(), &["config", "list", "--toml"]);
    assert!(stdout.contains("mood_avg_min_items = 2"));

    let (code, _, stderr) = run_cli(home.path(), &["config", "set", "thresholds.nope", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown configuration key"));

    let (code, _, stderr) = run_cli(
        home.path(),
        &["config", "set", "windows.chart_window_days", "4000000000"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("exceeds the maximum"));

    let (code, _, _) = run_cli(home.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "thresholds.mood_avg_min_items"]);
    assert_eq!(stdout.trim(), "5");
}

#[test]
fn test_config_file_changes_highlights() {
    let home = tempfile::tempdir().unwrap();
    let input = write_journal(home.path());
    let config = home.path().join("strict.toml");
    std::fs::write(&config, "[thresholds]\nmood_avg_min_items = 50\n").unwrap();

    let (code, stdout, _) = run_cli(
        home.path(),
        &[
            "stats",
            "check",
            "mood_avg",
            "--input",
            &input,
            "--today",
            "2024-10-20",
            "--config",
            config.to_str().unwrap(),
        ],
    );
    assert_eq!(code, 0);
    let check: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(check["highlighted"], false);
}
