//! Wire models for the ClickUp v2 API.

use serde::{Deserialize, Serialize};

use crate::flow::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskStoreError, TaskStoreResult},
};

/// Task payload returned by `GET task/{id}` and list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ClickUpTask {
    pub id: String,
    pub name: String,
    pub status: ClickUpStatus,
}

/// Nested status object of a ClickUp task.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ClickUpStatus {
    pub status: String,
}

/// Envelope returned by `GET list/{id}/task`.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ClickUpTaskPage {
    pub tasks: Vec<ClickUpTask>,
}

/// Envelope returned by `GET user`.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ClickUpUserEnvelope {
    pub user: ClickUpUser,
}

/// Authenticated ClickUp user.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ClickUpUser {
    pub id: u64,
}

/// Body of `PUT task/{id}` when changing status.
#[derive(Debug, Clone, Serialize)]
pub(super) struct StatusUpdate<'a> {
    pub status: &'a str,
}

impl TryFrom<ClickUpTask> for Task {
    type Error = TaskStoreError;

    fn try_from(value: ClickUpTask) -> TaskStoreResult<Self> {
        let id = TaskId::new(value.id).map_err(TaskStoreError::transport)?;
        let status = TaskStatus::try_from(value.status.status.as_str())?;
        Ok(Self::new(id, value.name, status))
    }
}
