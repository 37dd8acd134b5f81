//! Workflow transition engine for `flow checkout` and `flow submit`.
//!
//! Every operation evaluates its guards in a fixed order before issuing any
//! mutation. Guard failures are reported as ordinary outcomes. Collaborator
//! failures abort the remaining sequence without compensating for steps that
//! already ran; re-running the operation re-evaluates the guards and picks up
//! where the previous attempt stopped.

use crate::flow::{
    domain::{BranchName, FlowDomainError, ReviewRequest, Task, TaskId, TaskStatus},
    ports::{
        ReviewRequestError, ReviewRequestService, TaskStore, TaskStoreError, VcsBackend, VcsError,
    },
};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The task store does not know the task.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    /// The current branch carries the feature prefix but no task identifier.
    #[error("branch '{0}' does not encode a task identifier")]
    MalformedBranchName(BranchName),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] FlowDomainError),
    /// Task store operation failed.
    #[error(transparent)]
    TaskStore(#[from] TaskStoreError),
    /// VCS operation failed.
    #[error(transparent)]
    Vcs(#[from] VcsError),
    /// Review request creation failed.
    #[error(transparent)]
    ReviewRequest(#[from] ReviewRequestError),
}

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Per-invocation snapshot of the state a transition is decided from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowContext {
    base_branch: BranchName,
    current_branch: BranchName,
    working_tree_clean: bool,
    task: Task,
}

impl WorkflowContext {
    /// Returns the configured base branch.
    #[must_use]
    pub const fn base_branch(&self) -> &BranchName {
        &self.base_branch
    }

    /// Returns whether the working tree had no pending changes.
    #[must_use]
    pub const fn is_working_tree_clean(&self) -> bool {
        self.working_tree_clean
    }

    /// Returns the task snapshot.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the canonical feature branch of the task.
    #[must_use]
    pub fn target_branch(&self) -> BranchName {
        BranchName::for_task(&self.task)
    }
}

/// What `checkout` did, or why it refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutKind {
    /// The task branch is already checked out.
    AlreadyOnTaskBranch,
    /// The task is still open and must be moved to pending first.
    NotYetPending,
    /// The task is blocked.
    Blocked,
    /// The task is accepted or closed.
    AlreadyCompleted(TaskStatus),
    /// The working tree has pending changes.
    UncommittedChanges,
    /// A pending task got a fresh branch and moved to in progress.
    Started,
    /// An in-progress or in-review task branch was checked out and updated.
    Resumed(TaskStatus),
    /// A rejected task branch was checked out and moved back to in progress.
    Reopened,
    /// The status has no checkout transition.
    NoAction(TaskStatus),
}

impl CheckoutKind {
    /// Returns `true` when a guard stopped the operation.
    #[must_use]
    pub const fn is_guard_violation(self) -> bool {
        matches!(
            self,
            Self::AlreadyOnTaskBranch
                | Self::NotYetPending
                | Self::Blocked
                | Self::AlreadyCompleted(_)
                | Self::UncommittedChanges
        )
    }
}

/// Result of a `checkout` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    kind: CheckoutKind,
    branch: Option<BranchName>,
}

impl CheckoutOutcome {
    const fn new(kind: CheckoutKind, branch: Option<BranchName>) -> Self {
        Self { kind, branch }
    }

    /// Returns what happened.
    #[must_use]
    pub const fn kind(&self) -> CheckoutKind {
        self.kind
    }

    /// Returns the task branch when the outcome concerns one.
    #[must_use]
    pub const fn branch(&self) -> Option<&BranchName> {
        self.branch.as_ref()
    }

    /// Returns a human-readable description.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CheckoutOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let branch = self.branch.as_ref().map_or("", BranchName::as_str);
        match self.kind {
            CheckoutKind::AlreadyOnTaskBranch => write!(f, "already on task branch {branch}"),
            CheckoutKind::NotYetPending => {
                write!(f, "task must be assigned and moved to pending first")
            }
            CheckoutKind::Blocked => write!(f, "task is blocked"),
            CheckoutKind::AlreadyCompleted(status) => {
                write!(f, "task is already completed ({status})")
            }
            CheckoutKind::UncommittedChanges => write!(f, "commit pending changes first"),
            CheckoutKind::Started => write!(f, "started work on {branch}"),
            CheckoutKind::Resumed(status) => write!(f, "checked out {branch} ({status})"),
            CheckoutKind::Reopened => write!(f, "reopened {branch} after rejection"),
            CheckoutKind::NoAction(status) => write!(f, "nothing to do for task in {status}"),
        }
    }
}

/// What `submit` did, or why it refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    /// The current branch is not a task feature branch.
    NotFeatureBranch,
    /// The working tree has pending changes.
    UncommittedChanges,
    /// The branch was pushed, the task moved to review, and a review requested.
    SubmittedForReview,
    /// The branch was pushed to update an open review.
    ReviewUpdated,
    /// The status has no submit transition.
    NoAction(TaskStatus),
}

impl SubmitKind {
    /// Returns `true` when a guard stopped the operation.
    #[must_use]
    pub const fn is_guard_violation(self) -> bool {
        matches!(self, Self::NotFeatureBranch | Self::UncommittedChanges)
    }
}

/// Result of a `submit` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    kind: SubmitKind,
    branch: BranchName,
}

impl SubmitOutcome {
    const fn new(kind: SubmitKind, branch: BranchName) -> Self {
        Self { kind, branch }
    }

    /// Returns what happened.
    #[must_use]
    pub const fn kind(&self) -> SubmitKind {
        self.kind
    }

    /// Returns the branch that was current when submit ran.
    #[must_use]
    pub const fn branch(&self) -> &BranchName {
        &self.branch
    }

    /// Returns `true` when a review request was created.
    #[must_use]
    pub const fn review_requested(&self) -> bool {
        matches!(self.kind, SubmitKind::SubmittedForReview)
    }

    /// Returns a human-readable description.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let branch = &self.branch;
        match self.kind {
            SubmitKind::NotFeatureBranch => write!(f, "{branch} is not a feature branch"),
            SubmitKind::UncommittedChanges => write!(f, "commit pending changes first"),
            SubmitKind::SubmittedForReview => write!(f, "pushed {branch} and requested review"),
            SubmitKind::ReviewUpdated => write!(f, "pushed {branch} to update the review"),
            SubmitKind::NoAction(status) => write!(f, "nothing to submit for task in {status}"),
        }
    }
}

/// Runs one collaborator call, logging it and converting its error.
async fn step<T, E>(
    name: &'static str,
    action: impl Future<Output = Result<T, E>>,
) -> WorkflowResult<T>
where
    E: Into<WorkflowError> + fmt::Display,
{
    debug!(step = name, "workflow step");
    action.await.map_err(|err| {
        warn!(step = name, error = %err, "workflow step failed, aborting");
        err.into()
    })
}

/// Task-branch workflow orchestration service.
#[derive(Clone)]
pub struct WorkflowEngine<S, V, R>
where
    S: TaskStore,
    V: VcsBackend,
    R: ReviewRequestService,
{
    task_store: Arc<S>,
    vcs: Arc<V>,
    reviews: Arc<R>,
    base_branch: BranchName,
}

impl<S, V, R> WorkflowEngine<S, V, R>
where
    S: TaskStore,
    V: VcsBackend,
    R: ReviewRequestService,
{
    /// Creates a workflow engine that branches from and reviews against
    /// `base_branch`.
    #[must_use]
    pub const fn new(
        task_store: Arc<S>,
        vcs: Arc<V>,
        reviews: Arc<R>,
        base_branch: BranchName,
    ) -> Self {
        Self {
            task_store,
            vcs,
            reviews,
            base_branch,
        }
    }

    async fn find_task_or_error(&self, task_id: &TaskId) -> WorkflowResult<Task> {
        step("find task", self.task_store.find_by_id(task_id))
            .await?
            .ok_or_else(|| WorkflowError::TaskNotFound(task_id.clone()))
    }

    /// Switches the working copy to the feature branch of `task_id`,
    /// advancing the task status where the transition table requires it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Domain`] for a malformed identifier,
    /// [`WorkflowError::TaskNotFound`] when the task does not exist, and
    /// collaborator errors when a VCS or task store call fails.
    pub async fn checkout(&self, task_id: &str) -> WorkflowResult<CheckoutOutcome> {
        let id = TaskId::new(task_id)?;
        let task = self.find_task_or_error(&id).await?;
        let target = BranchName::for_task(&task);
        let current = step("read current branch", self.vcs.current_branch()).await?;

        if current == target {
            info!(task_id = %id, branch = %target, "already on task branch");
            return Ok(CheckoutOutcome::new(
                CheckoutKind::AlreadyOnTaskBranch,
                Some(target),
            ));
        }

        if let Some(refusal) = checkout_refusal(task.status()) {
            info!(task_id = %id, status = %task.status(), "checkout refused");
            return Ok(CheckoutOutcome::new(refusal, None));
        }

        let clean = step("read working tree state", self.vcs.is_clean()).await?;
        let context = WorkflowContext {
            base_branch: self.base_branch.clone(),
            current_branch: current,
            working_tree_clean: clean,
            task,
        };
        if !context.is_working_tree_clean() {
            info!(task_id = %id, "checkout refused, working tree has pending changes");
            return Ok(CheckoutOutcome::new(CheckoutKind::UncommittedChanges, None));
        }

        self.apply_checkout(&context).await
    }

    async fn apply_checkout(&self, context: &WorkflowContext) -> WorkflowResult<CheckoutOutcome> {
        let task = context.task();
        let base = context.base_branch();
        let target = context.target_branch();

        let kind = match task.status() {
            TaskStatus::Pending => {
                step("checkout base", self.vcs.checkout(base)).await?;
                step("pull base", self.vcs.pull(base)).await?;
                step("fetch", self.vcs.fetch()).await?;
                step(
                    "create task branch",
                    self.vcs.checkout_or_create(&target, Some(base)),
                )
                .await?;
                self.advance(task.id(), TaskStatus::InProgress).await?;
                CheckoutKind::Started
            }
            TaskStatus::InProgress | TaskStatus::InReview => {
                self.sync_task_branch(&target).await?;
                CheckoutKind::Resumed(task.status())
            }
            TaskStatus::Rejected => {
                self.sync_task_branch(&target).await?;
                self.advance(task.id(), TaskStatus::InProgress).await?;
                CheckoutKind::Reopened
            }
            TaskStatus::Open
            | TaskStatus::Blocked
            | TaskStatus::Accepted
            | TaskStatus::Closed
            | TaskStatus::Completed => {
                info!(task_id = %task.id(), status = %task.status(), "no checkout transition");
                return Ok(CheckoutOutcome::new(
                    CheckoutKind::NoAction(task.status()),
                    None,
                ));
            }
        };

        info!(task_id = %task.id(), branch = %target, ?kind, "checkout complete");
        Ok(CheckoutOutcome::new(kind, Some(target)))
    }

    async fn sync_task_branch(&self, target: &BranchName) -> WorkflowResult<()> {
        step("fetch", self.vcs.fetch()).await?;
        step("checkout task branch", self.vcs.checkout(target)).await?;
        step("pull task branch", self.vcs.pull(target)).await
    }

    async fn advance(&self, task_id: &TaskId, status: TaskStatus) -> WorkflowResult<()> {
        step("set task status", self.task_store.set_status(task_id, status)).await?;
        info!(task_id = %task_id, %status, "task status advanced");
        Ok(())
    }

    /// Pushes the current feature branch and, for tasks in progress, moves
    /// the task to review and requests a review against the base branch.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::MalformedBranchName`] when the feature branch
    /// carries no task identifier, [`WorkflowError::TaskNotFound`] when the
    /// task does not exist, and collaborator errors when a VCS, task store,
    /// or review call fails.
    pub async fn submit(&self) -> WorkflowResult<SubmitOutcome> {
        let current = step("read current branch", self.vcs.current_branch()).await?;
        if !current.is_feature_branch() {
            info!(branch = %current, "submit refused, not a feature branch");
            return Ok(SubmitOutcome::new(SubmitKind::NotFeatureBranch, current));
        }

        let clean = step("read working tree state", self.vcs.is_clean()).await?;
        if !clean {
            info!(branch = %current, "submit refused, working tree has pending changes");
            return Ok(SubmitOutcome::new(SubmitKind::UncommittedChanges, current));
        }

        let task_id = current
            .task_id()
            .ok_or_else(|| WorkflowError::MalformedBranchName(current.clone()))?;
        let task = self.find_task_or_error(&task_id).await?;
        let context = WorkflowContext {
            base_branch: self.base_branch.clone(),
            current_branch: current,
            working_tree_clean: clean,
            task,
        };

        self.apply_submit(context).await
    }

    async fn apply_submit(&self, context: WorkflowContext) -> WorkflowResult<SubmitOutcome> {
        let WorkflowContext {
            base_branch,
            current_branch,
            task,
            ..
        } = context;

        let kind = match task.status() {
            TaskStatus::InProgress => {
                step("push", self.vcs.push(&current_branch)).await?;
                self.advance(task.id(), TaskStatus::InReview).await?;
                let request = ReviewRequest::new(current_branch.clone(), base_branch);
                step("request review", self.reviews.create(&request)).await?;
                SubmitKind::SubmittedForReview
            }
            TaskStatus::InReview => {
                step("push", self.vcs.push(&current_branch)).await?;
                SubmitKind::ReviewUpdated
            }
            TaskStatus::Open
            | TaskStatus::Pending
            | TaskStatus::Rejected
            | TaskStatus::Blocked
            | TaskStatus::Accepted
            | TaskStatus::Closed
            | TaskStatus::Completed => SubmitKind::NoAction(task.status()),
        };

        info!(task_id = %task.id(), branch = %current_branch, ?kind, "submit complete");
        Ok(SubmitOutcome::new(kind, current_branch))
    }
}

/// Returns the guard refusal for statuses checkout never acts on.
const fn checkout_refusal(status: TaskStatus) -> Option<CheckoutKind> {
    if status.is_terminal() {
        return Some(CheckoutKind::AlreadyCompleted(status));
    }
    match status {
        TaskStatus::Open => Some(CheckoutKind::NotYetPending),
        TaskStatus::Blocked => Some(CheckoutKind::Blocked),
        TaskStatus::Pending
        | TaskStatus::InProgress
        | TaskStatus::InReview
        | TaskStatus::Rejected
        | TaskStatus::Accepted
        | TaskStatus::Closed
        | TaskStatus::Completed => None,
    }
}
