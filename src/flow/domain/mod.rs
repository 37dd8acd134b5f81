//! Domain model for the task-branch workflow.
//!
//! The flow domain covers task snapshots, their lifecycle status, and the
//! branch identity that ties a task to a feature branch. No I/O happens here.

mod branch;
mod error;
mod ids;
mod review;
mod task;

pub use branch::{BranchName, FEATURE_BRANCH_PREFIX, task_id_from_branch};
pub use error::{FlowDomainError, ParseTaskStatusError};
pub use ids::{RepositoryFullName, TaskId};
pub use review::ReviewRequest;
pub use task::{Task, TaskStatus};
