//! CLI command implementations.

pub mod check;
pub mod cleardb;
