//! Task store port for reading tasks and writing their status.

use crate::flow::domain::{ParseTaskStatusError, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Filter applied when listing tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskQuery {
    assigned_to_me: bool,
}

impl TaskQuery {
    /// Creates a query matching every task in scope.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            assigned_to_me: false,
        }
    }

    /// Creates a query matching tasks assigned to the authenticated user.
    #[must_use]
    pub const fn assigned_to_me() -> Self {
        Self {
            assigned_to_me: true,
        }
    }

    /// Returns `true` when the query is restricted to the current user.
    #[must_use]
    pub const fn is_assigned_to_me(self) -> bool {
        self.assigned_to_me
    }
}

/// Access to the external task tracker.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Finds a task by identifier.
    ///
    /// Returns `None` when the tracker does not know the task.
    async fn find_by_id(&self, id: &TaskId) -> TaskStoreResult<Option<Task>>;

    /// Sets the lifecycle status of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn set_status(&self, id: &TaskId, status: TaskStatus) -> TaskStoreResult<()>;

    /// Lists tasks matching the query.
    async fn list(&self, query: TaskQuery) -> TaskStoreResult<Vec<Task>>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The tracker reported a status this workflow does not model.
    #[error(transparent)]
    UnknownStatus(#[from] ParseTaskStatusError),

    /// The tracker answered with a non-success HTTP status.
    #[error("task tracker returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// A required setting was not provided.
    #[error("task store is missing configuration: {0}")]
    MissingConfiguration(&'static str),

    /// Transport, authentication, or decoding failure.
    #[error("task tracker error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
