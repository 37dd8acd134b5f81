//! Application services for the task-branch workflow.

mod branch;
mod clone;
mod tasks;
mod workflow;

pub use branch::{BranchSwitchError, BranchSwitchResult, BranchSwitchService};
pub use clone::{CloneError, CloneResult, CloneService, ClonedRepository};
pub use tasks::{TaskService, TaskServiceError, TaskServiceResult};
pub use workflow::{
    CheckoutKind, CheckoutOutcome, SubmitKind, SubmitOutcome, WorkflowContext, WorkflowEngine,
    WorkflowError, WorkflowResult,
};
