use serde_json::Value;

use crate::error::{Result, TodoError};
use crate::models::Task;
use crate::storage::{Document, DocumentStore, Filter, Update};

/// Collection holding [`Task`] documents.
pub const TASK_COLLECTION: &str = "task";
/// Collection reserved for [`crate::models::User`] documents.
pub const USER_COLLECTION: &str = "user";

/// Task operations over a [`DocumentStore`].
///
/// Tasks are looked up by name. Names are not unique; when several tasks
/// share one, `complete_by_name` and `delete_by_name` act on whichever the
/// store matches first.
pub struct TaskRepository<S> {
    store: S,
}

impl<S: DocumentStore> TaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates and persists a new pending task.
    #[tracing::instrument(skip(self))]
    pub fn create(&self, name: &str, description: Option<String>) -> Result<Task> {
        let task = Task::new(name, description);
        self.store.insert_one(TASK_COLLECTION, to_document(&task)?)?;
        tracing::debug!(id = %task.id, "task created");
        Ok(task)
    }

    /// Returns every task in store order.
    ///
    /// Fails with [`TodoError::EmptyResult`] when there are none, and with
    /// [`TodoError::StoreRead`] on the first document that does not decode.
    #[tracing::instrument(skip(self))]
    pub fn list_all(&self) -> Result<Vec<Task>> {
        let docs = self.store.find(TASK_COLLECTION, &Filter::all())?;
        let tasks = docs.into_iter().map(from_document).collect::<Result<Vec<_>>>()?;
        tracing::debug!(count = tasks.len(), "tasks loaded");
        if tasks.is_empty() {
            return Err(TodoError::EmptyResult);
        }
        Ok(tasks)
    }

    /// Marks the first task named `name` as completed.
    ///
    /// Returns the task as it was before the update.
    #[tracing::instrument(skip(self))]
    pub fn complete_by_name(&self, name: &str) -> Result<Task> {
        let before = self
            .store
            .find_one_and_update(TASK_COLLECTION, &Filter::eq("name", name), &Update::set("completed", true))?
            .ok_or_else(|| TodoError::NotFound(name.to_string()))?;
        from_document(before)
    }

    /// Deletes the first task named `name`.
    #[tracing::instrument(skip(self))]
    pub fn delete_by_name(&self, name: &str) -> Result<()> {
        let deleted = self.store.delete_one(TASK_COLLECTION, &Filter::eq("name", name))?;
        if deleted == 0 {
            return Err(TodoError::NotFound(name.to_string()));
        }
        Ok(())
    }
}

fn to_document(task: &Task) -> Result<Document> {
    match serde_json::to_value(task) {
        Ok(Value::Object(doc)) => Ok(doc),
        Ok(other) => Err(TodoError::StoreWrite(format!("task encoded as {other}, not a document"))),
        Err(e) => Err(TodoError::StoreWrite(e.to_string())),
    }
}

fn from_document(doc: Document) -> Result<Task> {
    serde_json::from_value(Value::Object(doc))
        .map_err(|e| TodoError::StoreRead(format!("could not decode task: {e}")))
}
