//! Adapter implementations for flow ports.

pub mod clickup;
pub mod git;
pub mod github;
pub mod memory;
