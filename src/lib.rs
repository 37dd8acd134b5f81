//! Taskflow: task-tracker and git feature-branch workflow.
//!
//! This crate keeps a task in an external tracker and its git feature branch
//! in step. `flow checkout` starts or resumes work on a task branch and
//! `flow submit` pushes it for review, each guarded by the working tree and
//! task status.
//!
//! # Architecture
//!
//! Taskflow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (git, ClickUp, GitHub)
//!
//! # Modules
//!
//! - [`flow`]: Branch identity, workflow transitions, and their collaborators
//! - [`cli`]: Command-line surface of the `flow` binary
//! - [`config`]: Validated runtime configuration

pub mod cli;
pub mod config;
pub mod flow;
