pub mod json_store;
pub mod memory;

pub use json_store::{JsonStore, default_store_path};
pub use memory::MemStore;

use crate::error::AppError;
use crate::model::{Task, TaskPatch};

/// How a store orders `list`, and therefore where a freshly created task
/// belongs in an already-fetched snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOrder {
    /// `list` returns newest first; created tasks go to the front.
    NewestFirst,
    /// `list` preserves insertion order; created tasks go to the back.
    Insertion,
}

/// Persistence boundary for the task collection. Sole authority for
/// identifier assignment; every mutating operation persists before returning.
pub trait TaskStore {
    fn order(&self) -> StoreOrder;

    /// Returns the full collection as a snapshot, never a delta.
    fn list(&self) -> Result<Vec<Task>, AppError>;

    /// Creates a task with `completed = false` and a fresh identifier.
    /// Rejects empty or whitespace-only text.
    fn create(&mut self, text: &str) -> Result<Task, AppError>;

    /// Applies the patch to the task with the given identifier, leaving
    /// unspecified fields untouched, and returns the updated record.
    fn update(&mut self, id: &str, patch: &TaskPatch) -> Result<Task, AppError>;

    /// Removes the task permanently. Identifiers are never reused.
    fn delete(&mut self, id: &str) -> Result<(), AppError>;
}

pub(crate) fn validated_text(text: &str) -> Result<&str, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("text is required"));
    }
    Ok(trimmed)
}

pub(crate) fn new_task_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Patches the matching task in place. Text is validated before either field
/// is touched, so a rejected patch leaves the collection unchanged.
pub(crate) fn apply_patch(
    tasks: &mut [Task],
    id: &str,
    patch: &TaskPatch,
) -> Result<Task, AppError> {
    let text = match patch.text.as_deref() {
        Some(value) => Some(validated_text(value)?.to_string()),
        None => None,
    };

    let task = tasks
        .iter_mut()
        .find(|task| task.id == id)
        .ok_or_else(|| AppError::not_found("task not found"))?;

    if let Some(text) = text {
        task.text = text;
    }
    if let Some(completed) = patch.completed {
        task.completed = completed;
    }

    Ok(task.clone())
}
