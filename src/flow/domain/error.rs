//! Error types for flow domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain flow values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowDomainError {
    /// The task identifier is empty or contains reserved characters.
    #[error("invalid task identifier '{0}', expected a non-empty token without '-' or whitespace")]
    InvalidTaskId(String),

    /// The branch name is empty or contains whitespace.
    #[error("invalid branch name '{0}'")]
    InvalidBranchName(String),

    /// The repository name does not follow `owner/repo` format.
    #[error("invalid repository name '{0}', expected owner/repo")]
    InvalidRepository(String),

    /// The clone URL does not end in an `owner/repo` path.
    #[error("cannot derive owner/repo from clone URL '{0}'")]
    InvalidCloneUrl(String),
}

/// Error returned while parsing task statuses from the task tracker.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
