use super::{StoreOrder, TaskStore, apply_patch, new_task_id, validated_text};
use crate::error::AppError;
use crate::model::{Task, TaskPatch};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Collection-backed store used by the server. Tasks carry a creation
/// timestamp and `list` returns them newest first.
#[derive(Debug, Default)]
pub struct MemStore {
    tasks: Vec<Task>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for MemStore {
    fn order(&self) -> StoreOrder {
        StoreOrder::NewestFirst
    }

    fn list(&self) -> Result<Vec<Task>, AppError> {
        // Insertion order is creation order, so newest first is the reverse.
        Ok(self.tasks.iter().rev().cloned().collect())
    }

    fn create(&mut self, text: &str) -> Result<Task, AppError> {
        let trimmed = validated_text(text)?;
        let created_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|err| AppError::invalid_data(err.to_string()))?;

        let task = Task {
            id: new_task_id(),
            text: trimmed.to_string(),
            completed: false,
            created_at: Some(created_at),
        };

        self.tasks.push(task.clone());
        Ok(task)
    }

    fn update(&mut self, id: &str, patch: &TaskPatch) -> Result<Task, AppError> {
        apply_patch(&mut self.tasks, id, patch)
    }

    fn delete(&mut self, id: &str) -> Result<(), AppError> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| AppError::not_found("task not found"))?;

        self.tasks.remove(index);
        Ok(())
    }
}
