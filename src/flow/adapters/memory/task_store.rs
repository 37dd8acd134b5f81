//! In-memory task store for workflow tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use crate::flow::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskQuery, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Every status write is recorded so tests can assert which transitions the
/// workflow performed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    assigned: BTreeSet<TaskId>,
    status_writes: Vec<(TaskId, TaskStatus)>,
}

fn lock_error(err: impl ToString) -> TaskStoreError {
    TaskStoreError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a task.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn insert(&self, task: Task) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.tasks.insert(task.id().clone(), task);
        Ok(())
    }

    /// Marks a task as assigned to the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn assign_to_me(&self, id: &TaskId) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.assigned.insert(id.clone());
        Ok(())
    }

    /// Returns every status write in the order it happened.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn status_writes(&self) -> TaskStoreResult<Vec<(TaskId, TaskStatus)>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.status_writes.clone())
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn find_by_id(&self, id: &TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(id).cloned())
    }

    async fn set_status(&self, id: &TaskId, status: TaskStatus) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let task = state
            .tasks
            .remove(id)
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))?;
        state.tasks.insert(id.clone(), task.with_status(status));
        state.status_writes.push((id.clone(), status));
        Ok(())
    }

    async fn list(&self, query: TaskQuery) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let tasks = state
            .tasks
            .values()
            .filter(|task| !query.is_assigned_to_me() || state.assigned.contains(task.id()))
            .cloned()
            .collect();
        Ok(tasks)
    }
}
