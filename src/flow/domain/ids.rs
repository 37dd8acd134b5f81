//! Identifier and validated scalar types for the flow domain.

use super::FlowDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a task in the external task tracker.
///
/// Task identifiers are opaque tokens. They must be non-empty and must not
/// contain `-` or whitespace, because the identifier is embedded in feature
/// branch names and recovered by splitting on `-`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FlowDomainError::InvalidTaskId`] when the value is empty after
    /// trimming or contains `-` or whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, FlowDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let is_valid = !normalized.is_empty()
            && !normalized.contains('-')
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(FlowDomainError::InvalidTaskId(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskId {
    type Error = FlowDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskId> for String {
    fn from(value: TaskId) -> Self {
        value.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized repository identifier in `owner/repo` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryFullName(String);

impl RepositoryFullName {
    /// Creates a validated repository name.
    ///
    /// # Errors
    ///
    /// Returns [`FlowDomainError::InvalidRepository`] if the value does not
    /// contain exactly one slash-delimited owner and repository segment.
    pub fn new(value: impl Into<String>) -> Result<Self, FlowDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let mut segments = normalized.split('/');
        let owner = segments.next().unwrap_or_default();
        let repo = segments.next().unwrap_or_default();
        let has_more_segments = segments.next().is_some();
        let is_valid = !owner.is_empty()
            && !repo.is_empty()
            && !has_more_segments
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(FlowDomainError::InvalidRepository(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Derives the repository name from the last two path segments of a clone
    /// URL.
    ///
    /// Both `https://host/owner/repo(.git)` and `git@host:owner/repo.git`
    /// forms are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`FlowDomainError::InvalidCloneUrl`] when fewer than two
    /// non-empty segments can be found.
    pub fn from_clone_url(url: &str) -> Result<Self, FlowDomainError> {
        let trimmed = url.trim().trim_end_matches('/');
        let without_suffix = trimmed.strip_suffix(".git").unwrap_or(trimmed);
        let mut segments = without_suffix.rsplit(['/', ':']);
        let repo = segments.next().unwrap_or_default();
        let owner = segments.next().unwrap_or_default();

        if owner.is_empty() || repo.is_empty() {
            return Err(FlowDomainError::InvalidCloneUrl(url.to_owned()));
        }

        Self::new(format!("{owner}/{repo}"))
            .map_err(|_| FlowDomainError::InvalidCloneUrl(url.to_owned()))
    }

    /// Returns the owner (organisation or user) segment.
    #[must_use]
    pub fn owner(&self) -> &str {
        self.0.split_once('/').map_or("", |(owner, _)| owner)
    }

    /// Returns the repository segment.
    #[must_use]
    pub fn repo(&self) -> &str {
        self.0.split_once('/').map_or("", |(_, repo)| repo)
    }

    /// Returns the repository name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RepositoryFullName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RepositoryFullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
