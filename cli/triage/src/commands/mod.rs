//! CLI command implementations.

pub mod ssvc;
pub mod workflow;
