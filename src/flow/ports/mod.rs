//! Port contracts for the task-branch workflow.
//!
//! Ports define infrastructure-agnostic interfaces used by flow services.

pub mod review;
pub mod task_store;
pub mod vcs;

pub use review::{ReviewRequestError, ReviewRequestResult, ReviewRequestService};
pub use task_store::{TaskQuery, TaskStore, TaskStoreError, TaskStoreResult};
pub use vcs::{RepositoryCloner, VcsBackend, VcsError, VcsResult};
