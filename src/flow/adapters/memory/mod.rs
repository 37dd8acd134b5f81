//! In-memory adapters for deterministic workflow tests.

mod review;
mod task_store;
mod vcs;

pub use review::RecordingReviewService;
pub use task_store::InMemoryTaskStore;
pub use vcs::{InMemoryVcs, VcsCommand, VcsOperation};
