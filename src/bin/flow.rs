//! `flow` command-line entry point.
//!
//! Usage:
//!
//! ```text
//! flow flow checkout <task-id>
//! flow flow submit
//! flow task get <id>
//! flow task list [--assigned]
//! flow task status <id> <status>
//! flow repo clone <url>
//! flow repo checkout --branch <branch>
//! flow pr create <head> <base>
//! ```
//!
//! Settings come from global flags or their environment fallbacks; see
//! `flow --help`.

use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use eyre::{Result, WrapErr};
use taskflow::{
    cli::{Cli, Command, FlowCommand, PrCommand, RepoCommand, TaskCommand, render_clone, render_task},
    config::FlowConfig,
    flow::{
        adapters::{clickup::ClickUpTaskStore, git::GitCli, github::GitHubCompareLinks},
        domain::{BranchName, ReviewRequest},
        ports::{ReviewRequestService, TaskQuery},
        services::{BranchSwitchService, CloneService, TaskService, WorkflowEngine},
    },
};
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_new(&cli.global.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let config = FlowConfig::from_args(&cli.global)?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build tokio runtime")?;

    let message = runtime.block_on(dispatch(cli.command, &config))?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{message}").wrap_err("failed to write output")?;
    Ok(())
}

async fn dispatch(command: Command, config: &FlowConfig) -> Result<String> {
    match command {
        Command::Flow(flow) => run_flow(flow, config).await,
        Command::Task(task) => run_task(task, config).await,
        Command::Repo(RepoCommand::Clone { url }) => {
            let cloner = Arc::new(GitCli::new(config.workdir(), config.remote()));
            let service = CloneService::new(cloner, config.root_dir());
            let cloned = service
                .clone_repository(&url)
                .await
                .wrap_err_with(|| format!("failed to clone {url}"))?;
            Ok(render_clone(&cloned))
        }
        Command::Repo(RepoCommand::Checkout { branch }) => {
            let vcs = Arc::new(GitCli::new(config.workdir(), config.remote()));
            let switched = BranchSwitchService::new(vcs)
                .switch(&branch)
                .await
                .wrap_err_with(|| format!("failed to check out {branch}"))?;
            Ok(format!("Checked out branch {switched}"))
        }
        Command::Pr(PrCommand::Create { head, base }) => {
            let request = ReviewRequest::new(BranchName::new(head)?, BranchName::new(base)?);
            review_links(config)
                .create(&request)
                .await
                .wrap_err("failed to create review request")?;
            Ok(format!("review requested for {request}"))
        }
    }
}

async fn run_flow(command: FlowCommand, config: &FlowConfig) -> Result<String> {
    if command.needs_review_repository() {
        config.review_repository()?;
    }

    let task_store = Arc::new(ClickUpTaskStore::new(config.clickup()?)?);
    let vcs = Arc::new(GitCli::new(config.workdir(), config.remote()));
    let engine = WorkflowEngine::new(
        task_store,
        vcs,
        Arc::new(review_links(config)),
        config.default_branch().clone(),
    );

    match command {
        FlowCommand::Checkout { task_id } => {
            let outcome = engine
                .checkout(&task_id)
                .await
                .wrap_err_with(|| format!("flow checkout {task_id} failed"))?;
            Ok(outcome.message())
        }
        FlowCommand::Submit => {
            let outcome = engine.submit().await.wrap_err("flow submit failed")?;
            Ok(outcome.message())
        }
    }
}

async fn run_task(command: TaskCommand, config: &FlowConfig) -> Result<String> {
    let service = TaskService::new(Arc::new(ClickUpTaskStore::new(config.clickup()?)?));
    match command {
        TaskCommand::Get { id } => {
            let task = service.get(&id).await?;
            Ok(render_task(&task))
        }
        TaskCommand::List { assigned } => {
            let query = if assigned {
                TaskQuery::assigned_to_me()
            } else {
                TaskQuery::all()
            };
            let tasks = service.list(query).await?;
            Ok(tasks.iter().map(render_task).collect::<Vec<_>>().join("\n"))
        }
        TaskCommand::Status { id, status } => {
            let applied = service.update_status(&id, &status).await?;
            Ok(format!("Task {id} status updated to {applied}"))
        }
    }
}

fn review_links(config: &FlowConfig) -> GitHubCompareLinks<io::Stdout> {
    GitHubCompareLinks::new(config.repository().cloned(), io::stdout())
}
