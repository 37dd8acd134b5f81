//! In-memory working copy for workflow tests.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::{Arc, RwLock};

use crate::flow::{
    domain::BranchName,
    ports::{RepositoryCloner, VcsBackend, VcsError, VcsResult},
};

/// Command issued against the in-memory working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCommand {
    /// Remote refs were fetched.
    Fetch,
    /// An existing branch was checked out.
    Checkout(BranchName),
    /// A branch was created from a base, or checked out if present.
    CheckoutOrCreate {
        /// Branch to switch to.
        branch: BranchName,
        /// Base the branch is created from.
        base: Option<BranchName>,
    },
    /// Remote changes were pulled.
    Pull(BranchName),
    /// A branch was pushed.
    Push(BranchName),
    /// A repository was cloned.
    Clone {
        /// Source URL.
        url: String,
        /// Target directory.
        destination: Utf8PathBuf,
    },
}

/// Operation selector used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsOperation {
    /// [`VcsBackend::current_branch`].
    CurrentBranch,
    /// [`VcsBackend::is_clean`].
    IsClean,
    /// [`VcsBackend::fetch`].
    Fetch,
    /// [`VcsBackend::checkout`].
    Checkout,
    /// [`VcsBackend::checkout_or_create`].
    CheckoutOrCreate,
    /// [`VcsBackend::pull`].
    Pull,
    /// [`VcsBackend::push`].
    Push,
    /// [`RepositoryCloner::clone_repository`].
    Clone,
}

/// Thread-safe in-memory working copy.
///
/// The copy tracks the current branch and cleanliness, records every
/// successful command, and can be primed to fail one operation.
#[derive(Debug, Clone)]
pub struct InMemoryVcs {
    state: Arc<RwLock<InMemoryVcsState>>,
}

#[derive(Debug)]
struct InMemoryVcsState {
    current_branch: BranchName,
    clean: bool,
    failing: Option<VcsOperation>,
    commands: Vec<VcsCommand>,
}

fn lock_error(err: impl ToString) -> VcsError {
    VcsError::backend(std::io::Error::other(err.to_string()))
}

impl InMemoryVcs {
    /// Creates a clean working copy on `current_branch`.
    #[must_use]
    pub fn on_branch(current_branch: BranchName) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryVcsState {
                current_branch,
                clean: true,
                failing: None,
                commands: Vec::new(),
            })),
        }
    }

    /// Marks the working tree as clean or dirty.
    ///
    /// # Errors
    ///
    /// Returns a backend error when lock acquisition fails.
    pub fn set_clean(&self, clean: bool) -> VcsResult<()> {
        self.state.write().map_err(lock_error)?.clean = clean;
        Ok(())
    }

    /// Switches the current branch without recording a command.
    ///
    /// # Errors
    ///
    /// Returns a backend error when lock acquisition fails.
    pub fn set_branch(&self, branch: BranchName) -> VcsResult<()> {
        self.state.write().map_err(lock_error)?.current_branch = branch;
        Ok(())
    }

    /// Makes every later call of `operation` fail.
    ///
    /// # Errors
    ///
    /// Returns a backend error when lock acquisition fails.
    pub fn fail_on(&self, operation: VcsOperation) -> VcsResult<()> {
        self.state.write().map_err(lock_error)?.failing = Some(operation);
        Ok(())
    }

    /// Clears any injected failure.
    ///
    /// # Errors
    ///
    /// Returns a backend error when lock acquisition fails.
    pub fn clear_failure(&self) -> VcsResult<()> {
        self.state.write().map_err(lock_error)?.failing = None;
        Ok(())
    }

    /// Returns the commands issued so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a backend error when lock acquisition fails.
    pub fn commands(&self) -> VcsResult<Vec<VcsCommand>> {
        Ok(self.state.read().map_err(lock_error)?.commands.clone())
    }

    /// Returns the branch currently checked out, without recording a call.
    ///
    /// # Errors
    ///
    /// Returns a backend error when lock acquisition fails.
    pub fn branch(&self) -> VcsResult<BranchName> {
        Ok(self.state.read().map_err(lock_error)?.current_branch.clone())
    }

    fn check(&self, operation: VcsOperation) -> VcsResult<()> {
        let state = self.state.read().map_err(lock_error)?;
        if state.failing == Some(operation) {
            return Err(VcsError::CommandFailed {
                command: format!("{operation:?}"),
                status: "injected failure".to_owned(),
                stderr: "simulated VCS failure".to_owned(),
            });
        }
        Ok(())
    }

    fn record(&self, command: VcsCommand, switch_to: Option<&BranchName>) -> VcsResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(branch) = switch_to {
            state.current_branch = branch.clone();
        }
        state.commands.push(command);
        Ok(())
    }
}

#[async_trait]
impl VcsBackend for InMemoryVcs {
    async fn current_branch(&self) -> VcsResult<BranchName> {
        self.check(VcsOperation::CurrentBranch)?;
        self.branch()
    }

    async fn is_clean(&self) -> VcsResult<bool> {
        self.check(VcsOperation::IsClean)?;
        Ok(self.state.read().map_err(lock_error)?.clean)
    }

    async fn fetch(&self) -> VcsResult<()> {
        self.check(VcsOperation::Fetch)?;
        self.record(VcsCommand::Fetch, None)
    }

    async fn checkout(&self, branch: &BranchName) -> VcsResult<()> {
        self.check(VcsOperation::Checkout)?;
        self.record(VcsCommand::Checkout(branch.clone()), Some(branch))
    }

    async fn checkout_or_create(
        &self,
        branch: &BranchName,
        base: Option<&BranchName>,
    ) -> VcsResult<()> {
        self.check(VcsOperation::CheckoutOrCreate)?;
        let command = VcsCommand::CheckoutOrCreate {
            branch: branch.clone(),
            base: base.cloned(),
        };
        self.record(command, Some(branch))
    }

    async fn pull(&self, branch: &BranchName) -> VcsResult<()> {
        self.check(VcsOperation::Pull)?;
        self.record(VcsCommand::Pull(branch.clone()), None)
    }

    async fn push(&self, branch: &BranchName) -> VcsResult<()> {
        self.check(VcsOperation::Push)?;
        self.record(VcsCommand::Push(branch.clone()), None)
    }
}

#[async_trait]
impl RepositoryCloner for InMemoryVcs {
    /// Records the clone and creates an empty destination directory.
    async fn clone_repository(&self, url: &str, destination: &Utf8Path) -> VcsResult<()> {
        self.check(VcsOperation::Clone)?;
        tokio::fs::create_dir_all(destination)
            .await
            .map_err(VcsError::backend)?;
        let command = VcsCommand::Clone {
            url: url.to_owned(),
            destination: destination.to_owned(),
        };
        self.record(command, None)
    }
}
