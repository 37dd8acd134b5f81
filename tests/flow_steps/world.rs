//! Shared world state for task-branch workflow BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use taskflow::flow::{
    adapters::memory::{InMemoryTaskStore, InMemoryVcs, RecordingReviewService, VcsCommand},
    domain::BranchName,
    services::{CheckoutOutcome, SubmitOutcome, WorkflowEngine, WorkflowResult},
};

/// Engine type used by the BDD world.
pub type TestEngine = WorkflowEngine<InMemoryTaskStore, InMemoryVcs, RecordingReviewService>;

/// Scenario world for checkout and submit behaviour tests.
pub struct FlowWorld {
    pub store: InMemoryTaskStore,
    pub vcs: InMemoryVcs,
    pub reviews: RecordingReviewService,
    pub engine: TestEngine,
    pub last_checkout: Option<WorkflowResult<CheckoutOutcome>>,
    pub last_submit: Option<WorkflowResult<SubmitOutcome>>,
}

impl FlowWorld {
    /// Creates a world whose working copy is clean and on `main`.
    ///
    /// # Panics
    ///
    /// Panics if the literal `main` is rejected as a branch name.
    #[must_use]
    pub fn new() -> Self {
        let main = BranchName::new("main").expect("main is a valid branch name");
        let store = InMemoryTaskStore::new();
        let vcs = InMemoryVcs::on_branch(main.clone());
        let reviews = RecordingReviewService::new();
        let engine = WorkflowEngine::new(
            Arc::new(store.clone()),
            Arc::new(vcs.clone()),
            Arc::new(reviews.clone()),
            main,
        );
        Self {
            store,
            vcs,
            reviews,
            engine,
            last_checkout: None,
            last_submit: None,
        }
    }

    /// Renders the VCS commands issued so far as a comma-separated list.
    pub fn command_log(&self) -> Result<String, eyre::Report> {
        let commands = self.vcs.commands()?;
        Ok(commands
            .iter()
            .map(describe_command)
            .collect::<Vec<_>>()
            .join(", "))
    }
}

impl Default for FlowWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn describe_command(command: &VcsCommand) -> String {
    match command {
        VcsCommand::Fetch => "fetch".to_owned(),
        VcsCommand::Checkout(branch) => format!("checkout {branch}"),
        VcsCommand::CheckoutOrCreate { branch, base } => match base {
            Some(base) => format!("create {branch} from {base}"),
            None => format!("create {branch}"),
        },
        VcsCommand::Pull(branch) => format!("pull {branch}"),
        VcsCommand::Push(branch) => format!("push {branch}"),
        VcsCommand::Clone { url, destination } => format!("clone {url} into {destination}"),
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> FlowWorld {
    FlowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
