//! Resolved runtime configuration.
//!
//! Values arrive from command-line flags or their environment fallbacks and
//! are validated once, up front. Nothing here is persisted.

use camino::{Utf8Path, Utf8PathBuf};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::cli::GlobalArgs;
use crate::flow::{
    adapters::clickup::ClickUpConfig,
    domain::{BranchName, FlowDomainError, RepositoryFullName},
    ports::TaskStoreError,
};

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting failed domain validation.
    #[error("invalid {setting}: {source}")]
    Invalid {
        /// Setting name as given on the command line.
        setting: &'static str,
        /// Validation failure.
        #[source]
        source: FlowDomainError,
    },

    /// A setting required by the requested command is absent.
    #[error("missing {setting}; pass {flag} or set {env}")]
    Missing {
        /// Human-readable setting name.
        setting: &'static str,
        /// Command-line flag.
        flag: &'static str,
        /// Environment variable.
        env: &'static str,
    },

    /// The task tracker settings are unusable.
    #[error(transparent)]
    TaskTracker(#[from] TaskStoreError),
}

/// Result type for configuration resolution.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Validated configuration shared by every command.
#[derive(Debug)]
pub struct FlowConfig {
    default_branch: BranchName,
    remote: String,
    workdir: Utf8PathBuf,
    repository: Option<RepositoryFullName>,
    root_dir: Utf8PathBuf,
    clickup_api_url: String,
    clickup_token: Option<SecretString>,
    clickup_list: Option<String>,
}

impl FlowConfig {
    /// Resolves configuration from parsed global arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the base branch or repository
    /// name is malformed.
    pub fn from_args(args: &GlobalArgs) -> ConfigResult<Self> {
        let default_branch =
            BranchName::new(args.default_branch.as_str()).map_err(|source| {
                ConfigError::Invalid {
                    setting: "--default-branch",
                    source,
                }
            })?;
        let repository = args
            .repository
            .as_deref()
            .map(RepositoryFullName::new)
            .transpose()
            .map_err(|source| ConfigError::Invalid {
                setting: "--repository",
                source,
            })?;

        Ok(Self {
            default_branch,
            remote: args.remote.clone(),
            workdir: args.workdir.clone(),
            repository,
            root_dir: args.root_dir.clone(),
            clickup_api_url: args.clickup_api_url.clone(),
            clickup_token: args.clickup_token.clone().map(SecretString::from),
            clickup_list: args.clickup_list.clone(),
        })
    }

    /// Returns the base branch feature branches start from.
    #[must_use]
    pub const fn default_branch(&self) -> &BranchName {
        &self.default_branch
    }

    /// Returns the git remote name.
    #[must_use]
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Returns the working copy directory.
    #[must_use]
    pub fn workdir(&self) -> &Utf8Path {
        &self.workdir
    }

    /// Returns the repository that hosts review requests, if configured.
    #[must_use]
    pub const fn repository(&self) -> Option<&RepositoryFullName> {
        self.repository.as_ref()
    }

    /// Returns the repository review requests are opened against.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no repository is configured.
    pub fn review_repository(&self) -> ConfigResult<&RepositoryFullName> {
        self.repository.as_ref().ok_or(ConfigError::Missing {
            setting: "review repository",
            flag: "--repository",
            env: "FLOW_REPOSITORY",
        })
    }

    /// Returns the directory repositories are cloned beneath.
    #[must_use]
    pub fn root_dir(&self) -> &Utf8Path {
        &self.root_dir
    }

    /// Builds ClickUp connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no token is configured and
    /// [`ConfigError::TaskTracker`] when the API URL is malformed.
    pub fn clickup(&self) -> ConfigResult<ClickUpConfig> {
        let token = self.clickup_token.as_ref().ok_or(ConfigError::Missing {
            setting: "ClickUp API token",
            flag: "--clickup-token",
            env: "CLICKUP_TOKEN",
        })?;
        let config = ClickUpConfig::new(
            &self.clickup_api_url,
            SecretString::from(token.expose_secret()),
        )?;
        Ok(match &self.clickup_list {
            Some(list_id) => config.with_list_id(list_id.as_str()),
            None => config,
        })
    }
}
