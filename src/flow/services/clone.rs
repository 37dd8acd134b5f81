//! Service layer for cloning repositories into an organised workspace root.

use crate::flow::{
    domain::{FlowDomainError, RepositoryFullName},
    ports::{RepositoryCloner, VcsError},
};
use camino::Utf8PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for repository cloning.
#[derive(Debug, Error)]
pub enum CloneError {
    /// The URL does not identify an `owner/repo`.
    #[error(transparent)]
    Domain(#[from] FlowDomainError),
    /// The clone itself failed.
    #[error(transparent)]
    Vcs(#[from] VcsError),
    /// The target directory could not be inspected.
    #[error("cannot inspect {path}: {source}")]
    Inspect {
        /// Directory being inspected.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for clone operations.
pub type CloneResult<T> = Result<T, CloneError>;

/// Location of a cloned repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClonedRepository {
    /// Repository derived from the URL.
    pub repository: RepositoryFullName,
    /// Directory holding the working copy.
    pub path: Utf8PathBuf,
    /// `true` when the directory existed and cloning was skipped.
    pub already_present: bool,
}

/// Clones repositories to `<root>/<owner>/<repo>`.
#[derive(Clone)]
pub struct CloneService<C>
where
    C: RepositoryCloner,
{
    cloner: Arc<C>,
    root: Utf8PathBuf,
}

impl<C> CloneService<C>
where
    C: RepositoryCloner,
{
    /// Creates a clone service rooted at `root`.
    #[must_use]
    pub fn new(cloner: Arc<C>, root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            cloner,
            root: root.into(),
        }
    }

    /// Clones `url` unless its target directory already exists.
    ///
    /// # Errors
    ///
    /// Returns [`CloneError::Domain`] when no `owner/repo` can be derived,
    /// [`CloneError::Inspect`] when the target cannot be checked, and
    /// [`CloneError::Vcs`] when cloning fails.
    pub async fn clone_repository(&self, url: &str) -> CloneResult<ClonedRepository> {
        let repository = RepositoryFullName::from_clone_url(url)?;
        let path = self.root.join(repository.owner()).join(repository.repo());

        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|source| CloneError::Inspect {
                path: path.clone(),
                source,
            })?;
        if exists {
            info!(%path, "repository already present, skipping clone");
            return Ok(ClonedRepository {
                repository,
                path,
                already_present: true,
            });
        }

        self.cloner.clone_repository(url, &path).await?;
        info!(%repository, %path, "repository cloned");
        Ok(ClonedRepository {
            repository,
            path,
            already_present: false,
        })
    }
}
