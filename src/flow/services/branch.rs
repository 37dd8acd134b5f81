//! Service layer for switching the working copy to an arbitrary branch.

use crate::flow::{
    domain::{BranchName, FlowDomainError},
    ports::{VcsBackend, VcsError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for branch switching.
#[derive(Debug, Error)]
pub enum BranchSwitchError {
    /// The branch name is malformed.
    #[error(transparent)]
    Domain(#[from] FlowDomainError),
    /// Fetching or switching failed.
    #[error(transparent)]
    Vcs(#[from] VcsError),
}

/// Result type for branch switching.
pub type BranchSwitchResult<T> = Result<T, BranchSwitchError>;

/// Switches the working copy to a named branch without touching any task.
#[derive(Clone)]
pub struct BranchSwitchService<V>
where
    V: VcsBackend,
{
    vcs: Arc<V>,
}

impl<V> BranchSwitchService<V>
where
    V: VcsBackend,
{
    /// Creates a branch switch service.
    #[must_use]
    pub const fn new(vcs: Arc<V>) -> Self {
        Self { vcs }
    }

    /// Fetches remote refs, then checks out `branch`, creating it from the
    /// current branch when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`BranchSwitchError::Domain`] for a malformed name and
    /// [`BranchSwitchError::Vcs`] when fetching or switching fails. A failed
    /// fetch stops before any checkout.
    pub async fn switch(&self, branch: &str) -> BranchSwitchResult<BranchName> {
        let name = BranchName::new(branch)?;
        self.vcs.fetch().await?;
        self.vcs.checkout_or_create(&name, None).await?;
        info!(branch = %name, "checked out branch");
        Ok(name)
    }
}
