//! Branch identity: canonical feature branch names derived from tasks.

use super::{FlowDomainError, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix shared by every task feature branch.
pub const FEATURE_BRANCH_PREFIX: &str = "feature/TASK-";

/// Number of title words kept in a feature branch slug.
const SLUG_WORD_LIMIT: usize = 4;

/// Git branch name.
///
/// Names supplied from outside must be non-empty and free of whitespace.
/// Names derived from a task through [`BranchName::for_task`] are always
/// accepted.
///
/// # Examples
///
///     use taskflow::flow::domain::BranchName;
///
///     let name = BranchName::new("main").expect("valid");
///     assert_eq!(name.as_str(), "main");
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchName(String);

impl BranchName {
    /// Creates a validated branch name.
    ///
    /// # Errors
    ///
    /// Returns [`FlowDomainError::InvalidBranchName`] when the value is empty
    /// after trimming or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, FlowDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(FlowDomainError::InvalidBranchName(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Derives the canonical feature branch for a task.
    ///
    /// The result is `feature/TASK-<id>-<slug>` where the slug is the first
    /// four whitespace-delimited words of the title joined with `-`. An empty
    /// title produces an empty slug.
    ///
    /// # Examples
    ///
    ///     use taskflow::flow::domain::{BranchName, Task, TaskId, TaskStatus};
    ///
    ///     let id = TaskId::new("42").expect("valid");
    ///     let task = Task::new(id, "Fix login bug across services", TaskStatus::Pending);
    ///     let branch = BranchName::for_task(&task);
    ///     assert_eq!(branch.as_str(), "feature/TASK-42-Fix-login-bug-across");
    #[must_use]
    pub fn for_task(task: &Task) -> Self {
        let slug = task
            .title()
            .split_whitespace()
            .take(SLUG_WORD_LIMIT)
            .collect::<Vec<_>>()
            .join("-");
        Self(format!("{FEATURE_BRANCH_PREFIX}{}-{slug}", task.id()))
    }

    /// Returns `true` when the name carries the feature branch prefix.
    #[must_use]
    pub fn is_feature_branch(&self) -> bool {
        self.0.starts_with(FEATURE_BRANCH_PREFIX)
    }

    /// Recovers the task identifier encoded in this branch name.
    #[must_use]
    pub fn task_id(&self) -> Option<TaskId> {
        task_id_from_branch(&self.0)
    }

    /// Returns the branch name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extracts the task identifier from a feature branch name.
///
/// Returns `None` when the name lacks the `feature/TASK-` prefix or the token
/// between the prefix and the next `-` is not a valid task identifier. The
/// slug is discarded, so hyphens inside it never affect the result.
#[must_use]
pub fn task_id_from_branch(name: &str) -> Option<TaskId> {
    let rest = name.strip_prefix(FEATURE_BRANCH_PREFIX)?;
    let token = rest.split('-').next().unwrap_or_default();
    TaskId::new(token).ok()
}
