//! Git adapter that drives the `git` executable.
//!
//! Arguments are passed as argv, never through a shell, so branch names and
//! URLs need no escaping.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use tokio::process::Command;
use tracing::debug;

use crate::flow::{
    domain::BranchName,
    ports::{RepositoryCloner, VcsBackend, VcsError, VcsResult},
};

/// Default remote name used for fetch, pull, and push.
pub const DEFAULT_REMOTE: &str = "origin";

/// Working copy backed by the `git` command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCli {
    workdir: Utf8PathBuf,
    remote: String,
}

impl GitCli {
    /// Creates an adapter for the working copy at `workdir`, talking to
    /// `remote`.
    #[must_use]
    pub fn new(workdir: impl Into<Utf8PathBuf>, remote: impl Into<String>) -> Self {
        Self {
            workdir: workdir.into(),
            remote: remote.into(),
        }
    }

    async fn git(&self, args: &[&str]) -> VcsResult<String> {
        run_git(Some(&self.workdir), args).await
    }
}

/// Runs `git` with `args` and returns its standard output.
async fn run_git(workdir: Option<&Utf8Path>, args: &[&str]) -> VcsResult<String> {
    let command_line = format!("git {}", args.join(" "));
    debug!(command = %command_line, "running git");

    let mut command = Command::new("git");
    command.args(args).kill_on_drop(true);
    if let Some(dir) = workdir {
        command.current_dir(dir);
    }

    let output = command.output().await.map_err(VcsError::backend)?;
    if !output.status.success() {
        return Err(VcsError::CommandFailed {
            command: command_line,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[async_trait]
impl VcsBackend for GitCli {
    async fn current_branch(&self) -> VcsResult<BranchName> {
        let args = ["rev-parse", "--abbrev-ref", "HEAD"];
        let output = self.git(&args).await?;
        BranchName::new(output.trim()).map_err(|_| VcsError::UnexpectedOutput {
            command: format!("git {}", args.join(" ")),
            output,
        })
    }

    async fn is_clean(&self) -> VcsResult<bool> {
        let output = self.git(&["status", "--porcelain"]).await?;
        Ok(output.trim().is_empty())
    }

    async fn fetch(&self) -> VcsResult<()> {
        self.git(&["fetch", self.remote.as_str()]).await.map(drop)
    }

    async fn checkout(&self, branch: &BranchName) -> VcsResult<()> {
        self.git(&["checkout", branch.as_str()]).await.map(drop)
    }

    async fn checkout_or_create(
        &self,
        branch: &BranchName,
        base: Option<&BranchName>,
    ) -> VcsResult<()> {
        let mut create_args = vec!["checkout", "-b", branch.as_str()];
        if let Some(base_branch) = base {
            create_args.push(base_branch.as_str());
        }

        match self.git(&create_args).await {
            Ok(_) => Ok(()),
            Err(VcsError::CommandFailed { stderr, .. }) => {
                debug!(branch = %branch, %stderr, "branch creation failed, checking out existing branch");
                self.checkout(branch).await
            }
            Err(other) => Err(other),
        }
    }

    async fn pull(&self, branch: &BranchName) -> VcsResult<()> {
        self.git(&["pull", self.remote.as_str(), branch.as_str()])
            .await
            .map(drop)
    }

    async fn push(&self, branch: &BranchName) -> VcsResult<()> {
        self.git(&["push", "-u", self.remote.as_str(), branch.as_str()])
            .await
            .map(drop)
    }
}

#[async_trait]
impl RepositoryCloner for GitCli {
    async fn clone_repository(&self, url: &str, destination: &Utf8Path) -> VcsResult<()> {
        run_git(None, &["clone", url, destination.as_str()])
            .await
            .map(drop)
    }
}
