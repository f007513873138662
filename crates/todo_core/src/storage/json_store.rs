use super::{StoreOrder, TaskStore, apply_patch, new_task_id, validated_text};
use crate::error::AppError;
use crate::model::{Task, TaskPatch};
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "tasks.json";

/// File-backed store. The whole collection lives as a single JSON array in
/// one file, read once at open and rewritten in full on every mutation
/// before the call returns.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

/// Resolves the store file location: `TODO_STORE_PATH` when set, otherwise
/// the platform config directory.
pub fn default_store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var("TODO_STORE_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::unavailable("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("todo").join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::unavailable("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("todo")
            .join(STORE_FILE_NAME))
    }
}

impl JsonStore {
    /// Opens the store at `path`. A missing file is an empty collection; an
    /// unreadable or unparsable one is fatal here, not on later calls.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self, AppError> {
        let path = path.into();
        let tasks = load_tasks(&path)?;
        Ok(Self { path, tasks })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), AppError> {
        save_tasks(&self.path, &self.tasks)
    }
}

fn load_tasks(path: &Path) -> Result<Vec<Task>, AppError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content =
        std::fs::read_to_string(path).map_err(|err| AppError::unavailable(err.to_string()))?;
    serde_json::from_str(&content).map_err(|err| AppError::invalid_data(err.to_string()))
}

fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| AppError::unavailable(err.to_string()))?;
    }

    let content = serde_json::to_string_pretty(tasks)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| AppError::unavailable(err.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions)
            .map_err(|err| AppError::unavailable(err.to_string()))?;
    }

    Ok(())
}

impl TaskStore for JsonStore {
    fn order(&self) -> StoreOrder {
        StoreOrder::Insertion
    }

    fn list(&self) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.clone())
    }

    fn create(&mut self, text: &str) -> Result<Task, AppError> {
        let trimmed = validated_text(text)?;

        let task = Task {
            id: new_task_id(),
            text: trimmed.to_string(),
            completed: false,
            created_at: None,
        };

        self.tasks.push(task.clone());
        self.persist()?;

        Ok(task)
    }

    fn update(&mut self, id: &str, patch: &TaskPatch) -> Result<Task, AppError> {
        let updated = apply_patch(&mut self.tasks, id, patch)?;
        self.persist()?;
        Ok(updated)
    }

    fn delete(&mut self, id: &str) -> Result<(), AppError> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| AppError::not_found("task not found"))?;

        self.tasks.remove(index);
        self.persist()?;
        Ok(())
    }
}
