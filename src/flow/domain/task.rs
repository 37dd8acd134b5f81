//! Task snapshot and task lifecycle status types.

use super::{ParseTaskStatusError, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status as tracked by the external task tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task exists but has not been scheduled.
    Open,
    /// Task is scheduled and waiting for work to start.
    Pending,
    /// Task is being implemented.
    InProgress,
    /// Task is awaiting review.
    InReview,
    /// Review sent the task back for more work.
    Rejected,
    /// Task cannot progress until something external changes.
    Blocked,
    /// Task passed review.
    Accepted,
    /// Task has been closed.
    Closed,
    /// Task work is complete.
    Completed,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 9] = [
        Self::Open,
        Self::Pending,
        Self::InProgress,
        Self::InReview,
        Self::Rejected,
        Self::Blocked,
        Self::Accepted,
        Self::Closed,
        Self::Completed,
    ];

    /// Returns the canonical snake-case representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Rejected => "rejected",
            Self::Blocked => "blocked",
            Self::Accepted => "accepted",
            Self::Closed => "closed",
            Self::Completed => "completed",
        }
    }

    /// Returns the human-readable label used by the task tracker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::InReview => "in review",
            Self::Rejected => "rejected",
            Self::Blocked => "blocked",
            Self::Accepted => "accepted",
            Self::Closed => "closed",
            Self::Completed => "completed",
        }
    }

    /// Returns `true` when the workflow never moves a task out of this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Closed)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    /// Parses tracker labels case-insensitively, treating spaces, hyphens,
    /// and underscores as the same separator.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized: String = value
            .trim()
            .chars()
            .map(|ch| match ch {
                ' ' | '-' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "in_review" => Ok(Self::InReview),
            "rejected" => Ok(Self::Rejected),
            "blocked" => Ok(Self::Blocked),
            "accepted" => Ok(Self::Accepted),
            "closed" => Ok(Self::Closed),
            "completed" | "complete" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Snapshot of a task as read from the task tracker.
///
/// Snapshots are never cached beyond a single workflow operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    status: TaskStatus,
}

impl Task {
    /// Creates a task snapshot.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id,
            title: title.into(),
            status,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns a copy of this snapshot carrying a different status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}
