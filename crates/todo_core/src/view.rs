//! Presentation state machine: the client-visible task list plus the
//! transient interaction state (current filter, in-progress edit) that is
//! never persisted.

use crate::error::AppError;
use crate::model::{Task, TaskPatch};
use crate::service::TaskService;
use crate::storage::{StoreOrder, TaskStore};

/// View-only predicate applied to the task collection for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(AppError::validation(format!(
                "unknown filter '{other}' (expected all, active or completed)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EditSession {
    id: String,
    draft: String,
}

/// Holds the last-fetched snapshot and applies transitions
/// confirm-then-update: every mutation goes to the service first, and a
/// failed call leaves the displayed state exactly as it was.
#[derive(Debug)]
pub struct TaskView<S: TaskStore> {
    service: TaskService<S>,
    tasks: Vec<Task>,
    filter: Filter,
    editing: Option<EditSession>,
}

impl<S: TaskStore> TaskView<S> {
    /// Builds the view and fetches the initial snapshot.
    pub fn open(service: TaskService<S>) -> Result<Self, AppError> {
        let tasks = service.list()?;
        Ok(Self {
            service,
            tasks,
            filter: Filter::All,
            editing: None,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_ref().map(|edit| edit.id.as_str())
    }

    pub fn editing_draft(&self) -> Option<&str> {
        self.editing.as_ref().map(|edit| edit.draft.as_str())
    }

    /// Replaces the snapshot with a fresh fetch.
    pub fn refresh(&mut self) -> Result<(), AppError> {
        self.tasks = self.service.list()?;
        Ok(())
    }

    /// Whitespace-only input is a no-op and returns `None`; otherwise the
    /// created task joins the snapshot where the store's ordering puts it.
    pub fn add(&mut self, input: &str) -> Result<Option<Task>, AppError> {
        if input.trim().is_empty() {
            return Ok(None);
        }

        let task = self.service.create(input)?;
        match self.service.order() {
            StoreOrder::NewestFirst => self.tasks.insert(0, task.clone()),
            StoreOrder::Insertion => self.tasks.push(task.clone()),
        }

        Ok(Some(task))
    }

    /// Flips the completion flag of the given task.
    pub fn toggle(&mut self, id: &str) -> Result<Task, AppError> {
        let current = self
            .tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or_else(|| AppError::not_found("task not found"))?;

        let patch = TaskPatch::completed(!current.completed);
        let updated = self.service.update(id, &patch)?;
        self.replace(updated.clone());

        Ok(updated)
    }

    /// Opens an edit session seeded with the task's current text. At most
    /// one task is editable at a time; a second call moves the session.
    pub fn start_editing(&mut self, id: &str) -> Result<(), AppError> {
        let task = self
            .tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or_else(|| AppError::not_found("task not found"))?;

        self.editing = Some(EditSession {
            id: task.id.clone(),
            draft: task.text.clone(),
        });

        Ok(())
    }

    /// Replaces the draft text of the open edit session; ignored when no
    /// session is open.
    pub fn edit_draft(&mut self, text: &str) {
        if let Some(edit) = self.editing.as_mut() {
            edit.draft = text.to_string();
        }
    }

    /// Saves the open edit session. A whitespace-only draft is a no-op that
    /// leaves the session open; returns the updated task otherwise.
    pub fn save_edit(&mut self) -> Result<Option<Task>, AppError> {
        let (id, draft) = match self.editing.as_ref() {
            Some(edit) if !edit.draft.trim().is_empty() => {
                (edit.id.clone(), edit.draft.clone())
            }
            _ => return Ok(None),
        };

        let updated = self.service.update(&id, &TaskPatch::text(draft))?;
        self.replace(updated.clone());
        self.editing = None;

        Ok(Some(updated))
    }

    /// Clears the edit session without touching the snapshot.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Deletes the task and drops it from the snapshot.
    pub fn delete(&mut self, id: &str) -> Result<(), AppError> {
        self.service.delete(id)?;
        self.tasks.retain(|task| task.id != id);
        if self.editing.as_ref().is_some_and(|edit| edit.id == id) {
            self.editing = None;
        }

        Ok(())
    }

    /// Changes the filter; triggers no store operation.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Recomputed on every call, never cached.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    pub fn empty_message(&self) -> &'static str {
        match self.filter {
            Filter::All => "No tasks yet!",
            Filter::Active => "No active tasks!",
            Filter::Completed => "No completed tasks!",
        }
    }

    fn replace(&mut self, updated: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|task| task.id == updated.id) {
            *slot = updated;
        }
    }
}
