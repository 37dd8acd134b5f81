//! Step definitions for task-branch workflow scenarios.

mod given;
mod then;
mod when;
pub mod world;
