//! Command-line surface of the `flow` binary.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

use crate::flow::{
    adapters::{clickup::DEFAULT_API_URL, git::DEFAULT_REMOTE},
    domain::Task,
    services::ClonedRepository,
};

/// flow - keep task tracker status and git feature branches in step
#[derive(Parser, Debug)]
#[command(name = "flow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings shared by every command.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Base branch feature branches start from and reviews target
    #[arg(long, global = true, env = "FLOW_DEFAULT_BRANCH", default_value = "main")]
    pub default_branch: String,

    /// Git remote used for fetch, pull, and push
    #[arg(long, global = true, env = "FLOW_REMOTE", default_value = DEFAULT_REMOTE)]
    pub remote: String,

    /// Working copy the workflow operates on
    #[arg(long, global = true, env = "FLOW_WORKDIR", default_value = ".")]
    pub workdir: Utf8PathBuf,

    /// Repository (owner/repo) that hosts review requests
    #[arg(long, global = true, env = "FLOW_REPOSITORY")]
    pub repository: Option<String>,

    /// Directory repositories are cloned beneath
    #[arg(long, global = true, env = "FLOW_ROOT_DIR", default_value = ".")]
    pub root_dir: Utf8PathBuf,

    /// ClickUp API token
    #[arg(long, global = true, env = "CLICKUP_TOKEN", hide_env_values = true)]
    pub clickup_token: Option<String>,

    /// ClickUp list that task listings are scoped to
    #[arg(long, global = true, env = "CLICKUP_LIST_ID")]
    pub clickup_list: Option<String>,

    /// ClickUp API root
    #[arg(long, global = true, env = "CLICKUP_API_URL", default_value = DEFAULT_API_URL)]
    pub clickup_api_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "FLOW_LOG", default_value = "warn")]
    pub log_level: String,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Task-branch workflow
    #[command(subcommand)]
    Flow(FlowCommand),

    /// Task tracker queries and updates
    #[command(subcommand)]
    Task(TaskCommand),

    /// Repository management
    #[command(subcommand)]
    Repo(RepoCommand),

    /// Review requests
    #[command(subcommand)]
    Pr(PrCommand),
}

/// Workflow commands.
#[derive(Subcommand, Debug)]
pub enum FlowCommand {
    /// Switch to the feature branch of a task, starting work if needed
    Checkout {
        /// Task identifier
        task_id: String,
    },

    /// Push the current feature branch and move its task to review
    Submit,
}

impl FlowCommand {
    /// Returns `true` when the command may open a review request.
    ///
    /// Such commands need a review repository before any side effect runs.
    #[must_use]
    pub const fn needs_review_repository(&self) -> bool {
        matches!(self, Self::Submit)
    }
}

/// Task tracker commands.
#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Show one task
    Get {
        /// Task identifier
        id: String,
    },

    /// List tasks in the configured list
    #[command(alias = "ls")]
    List {
        /// Only tasks assigned to the authenticated user
        #[arg(long)]
        assigned: bool,
    },

    /// Set the status of a task
    Status {
        /// Task identifier
        id: String,
        /// New status label, e.g. "in progress"
        status: String,
    },
}

/// Repository commands.
#[derive(Subcommand, Debug)]
pub enum RepoCommand {
    /// Clone a repository to <root-dir>/<owner>/<repo>
    Clone {
        /// Clone URL
        url: String,
    },

    /// Fetch, then switch to a branch, creating it when missing
    Checkout {
        /// Branch to switch to
        #[arg(long)]
        branch: String,
    },
}

/// Review request commands.
#[derive(Subcommand, Debug)]
pub enum PrCommand {
    /// Create a review request from head into base
    Create {
        /// Branch under review
        head: String,
        /// Branch to merge into
        base: String,
    },
}

/// Renders a task as one tab-separated line.
#[must_use]
pub fn render_task(task: &Task) -> String {
    format!("{}\t{}\t{}", task.id(), task.title(), task.status())
}

/// Renders the result of a clone.
#[must_use]
pub fn render_clone(cloned: &ClonedRepository) -> String {
    if cloned.already_present {
        format!(
            "Repository already exists at {}. Skipping clone step.",
            cloned.path
        )
    } else {
        format!("Repository cloned successfully to {}", cloned.path)
    }
}
