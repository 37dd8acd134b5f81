//! Service layer for direct task lookups and status changes.

use crate::flow::{
    domain::{FlowDomainError, ParseTaskStatusError, Task, TaskId, TaskStatus},
    ports::{TaskQuery, TaskStore, TaskStoreError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] FlowDomainError),
    /// The requested status label is unknown.
    #[error(transparent)]
    Status(#[from] ParseTaskStatusError),
    /// Task store operation failed.
    #[error(transparent)]
    TaskStore(#[from] TaskStoreError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task lookup and status service.
#[derive(Clone)]
pub struct TaskService<S>
where
    S: TaskStore,
{
    task_store: Arc<S>,
}

impl<S> TaskService<S>
where
    S: TaskStore,
{
    /// Creates a task service.
    #[must_use]
    pub const fn new(task_store: Arc<S>) -> Self {
        Self { task_store }
    }

    /// Fetches a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist,
    /// domain errors for malformed identifiers, and task store errors.
    pub async fn get(&self, task_id: &str) -> TaskServiceResult<Task> {
        let id = TaskId::new(task_id)?;
        self.task_store
            .find_by_id(&id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Lists tasks matching `query`.
    ///
    /// # Errors
    ///
    /// Returns task store errors.
    pub async fn list(&self, query: TaskQuery) -> TaskServiceResult<Vec<Task>> {
        Ok(self.task_store.list(query).await?)
    }

    /// Sets the status of a task from a tracker label such as `in progress`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Status`] for unknown labels, domain errors
    /// for malformed identifiers, and task store errors.
    pub async fn update_status(&self, task_id: &str, label: &str) -> TaskServiceResult<TaskStatus> {
        let id = TaskId::new(task_id)?;
        let status = TaskStatus::try_from(label)?;
        self.task_store.set_status(&id, status).await?;
        info!(task_id = %id, %status, "task status updated");
        Ok(status)
    }
}
