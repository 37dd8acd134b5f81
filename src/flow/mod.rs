//! Task-branch workflow.
//!
//! This module moves a tracker task through its lifecycle while keeping a
//! matching git feature branch in sync. `checkout` derives the task branch,
//! checks the working tree and task status, and switches branches, creating
//! the branch and starting the task when it is pending. `submit` pushes the
//! current feature branch and hands the task over for review. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
