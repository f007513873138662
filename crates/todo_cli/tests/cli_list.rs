use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("todo-{nanos}-{file_name}"))
}

fn seed_store(path: &PathBuf) {
    let content = serde_json::json!([
        {"id": "task-a", "text": "write report", "completed": false},
        {"id": "task-b", "text": "file taxes", "completed": true},
        {"id": "task-c", "text": "walk dog", "completed": false}
    ]);
    std::fs::write(path, serde_json::to_string_pretty(&content).unwrap()).unwrap();
}

#[test]
fn list_shows_all_tasks_in_insertion_order() {
    let exe = env!("CARGO_BIN_EXE_todo");
    let store_path = temp_path("cli-list-all.json");
    seed_store(&store_path);

    let output = Command::new(exe)
        .args(["list"])
        .env("TODO_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report = stdout.find("write report").unwrap();
    let taxes = stdout.find("file taxes").unwrap();
    let dog = stdout.find("walk dog").unwrap();
    assert!(report < taxes && taxes < dog);
}

#[test]
fn list_filter_active_hides_completed_tasks() {
    let exe = env!("CARGO_BIN_EXE_todo");
    let store_path = temp_path("cli-list-active.json");
    seed_store(&store_path);

    let output = Command::new(exe)
        .args(["list", "--filter", "active"])
        .env("TODO_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("write report"));
    assert!(stdout.contains("walk dog"));
    assert!(!stdout.contains("file taxes"));
}

#[test]
fn list_filter_completed_shows_only_completed_tasks() {
    let exe = env!("CARGO_BIN_EXE_todo");
    let store_path = temp_path("cli-list-completed.json");
    seed_store(&store_path);

    let output = Command::new(exe)
        .args(["list", "--filter", "completed", "--json"])
        .env("TODO_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let tasks: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], "task-b");
}

#[test]
fn list_rejects_an_unknown_filter() {
    let exe = env!("CARGO_BIN_EXE_todo");
    let store_path = temp_path("cli-list-bad-filter.json");
    seed_store(&store_path);

    let output = Command::new(exe)
        .args(["list", "--filter", "done"])
        .env("TODO_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown filter"));
}

#[test]
fn list_on_an_empty_store_prints_the_empty_message() {
    let exe = env!("CARGO_BIN_EXE_todo");
    let store_path = temp_path("cli-list-empty.json");

    let output = Command::new(exe)
        .args(["list"])
        .env("TODO_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No tasks yet!"));

    let output = Command::new(exe)
        .args(["list", "--filter", "completed"])
        .env("TODO_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No completed tasks!"));
}
