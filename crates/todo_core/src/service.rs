use crate::error::AppError;
use crate::model::{Task, TaskPatch};
use crate::storage::{StoreOrder, TaskStore};

/// Single entry point between presentation code and storage. Forwards every
/// operation to the injected store unchanged; this is the seam where
/// validation or authorization would land without touching presentation
/// code.
#[derive(Debug)]
pub struct TaskService<S: TaskStore> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn order(&self) -> StoreOrder {
        self.store.order()
    }

    pub fn list(&self) -> Result<Vec<Task>, AppError> {
        self.store.list()
    }

    pub fn create(&mut self, text: &str) -> Result<Task, AppError> {
        self.store.create(text)
    }

    pub fn update(&mut self, id: &str, patch: &TaskPatch) -> Result<Task, AppError> {
        self.store.update(id, patch)
    }

    pub fn delete(&mut self, id: &str) -> Result<(), AppError> {
        self.store.delete(id)
    }
}
