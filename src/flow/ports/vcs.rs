//! Version control ports for the local working copy.

use crate::flow::domain::BranchName;
use async_trait::async_trait;
use camino::Utf8Path;
use std::sync::Arc;
use thiserror::Error;

/// Result type for version control operations.
pub type VcsResult<T> = Result<T, VcsError>;

/// Operations the workflow performs against the local working copy.
///
/// Implementations own all remote naming; callers pass only branch names.
#[async_trait]
pub trait VcsBackend: Send + Sync {
    /// Returns the branch currently checked out.
    async fn current_branch(&self) -> VcsResult<BranchName>;

    /// Returns `true` when the working tree has no pending changes.
    async fn is_clean(&self) -> VcsResult<bool>;

    /// Fetches remote refs.
    async fn fetch(&self) -> VcsResult<()>;

    /// Switches to an existing branch.
    async fn checkout(&self, branch: &BranchName) -> VcsResult<()>;

    /// Creates `branch` from `base` and switches to it, or switches to it when
    /// it already exists.
    async fn checkout_or_create(
        &self,
        branch: &BranchName,
        base: Option<&BranchName>,
    ) -> VcsResult<()>;

    /// Pulls remote changes for `branch` into the current branch.
    async fn pull(&self, branch: &BranchName) -> VcsResult<()>;

    /// Pushes `branch` to the remote.
    async fn push(&self, branch: &BranchName) -> VcsResult<()>;
}

/// Cloning of remote repositories into a local directory.
#[async_trait]
pub trait RepositoryCloner: Send + Sync {
    /// Clones `url` into `destination`.
    async fn clone_repository(&self, url: &str, destination: &Utf8Path) -> VcsResult<()>;
}

/// Errors returned by version control adapters.
#[derive(Debug, Clone, Error)]
pub enum VcsError {
    /// A VCS command exited unsuccessfully.
    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        /// The command line that failed.
        command: String,
        /// Exit status description.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// A VCS command produced output that could not be interpreted.
    #[error("unexpected output from `{command}`: {output}")]
    UnexpectedOutput {
        /// The command line that ran.
        command: String,
        /// The offending output.
        output: String,
    },

    /// The backend could not run the command at all.
    #[error("VCS backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl VcsError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
