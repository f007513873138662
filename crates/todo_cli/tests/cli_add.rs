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

#[test]
fn add_command_succeeds() {
    let exe = env!("CARGO_BIN_EXE_todo");
    let store_path = temp_path("cli-add.json");
    let output = Command::new(exe)
        .args(["add", "demo task"])
        .env("TODO_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: demo task"));
}

#[test]
fn add_command_persists_to_the_store_file() {
    let exe = env!("CARGO_BIN_EXE_todo");
    let store_path = temp_path("cli-add-persist.json");
    let output = Command::new(exe)
        .args(["add", "persisted task"])
        .env("TODO_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");
    assert!(output.status.success());

    let on_disk = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    let tasks: serde_json::Value = serde_json::from_str(&on_disk).unwrap();
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "persisted task");
    assert_eq!(tasks[0]["completed"], false);
}

#[test]
fn add_command_rejects_missing_text() {
    let exe = env!("CARGO_BIN_EXE_todo");
    let store_path = temp_path("cli-add-missing.json");
    let output = Command::new(exe)
        .args(["add"])
        .env("TODO_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");

    assert!(!output.status.success());
    assert!(!store_path.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: validation"));
}

#[test]
fn add_command_rejects_whitespace_text() {
    let exe = env!("CARGO_BIN_EXE_todo");
    let store_path = temp_path("cli-add-blank.json");
    let output = Command::new(exe)
        .args(["add", "   "])
        .env("TODO_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");

    assert!(!output.status.success());
    assert!(!store_path.exists());
}

#[test]
fn add_command_emits_json_when_asked() {
    let exe = env!("CARGO_BIN_EXE_todo");
    let store_path = temp_path("cli-add-json.json");
    let output = Command::new(exe)
        .args(["add", "json task", "--json"])
        .env("TODO_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let task: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(task["text"], "json task");
    assert_eq!(task["completed"], false);
    assert!(task["id"].as_str().is_some_and(|id| !id.is_empty()));
}
