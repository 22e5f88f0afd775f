//! Scheduling algorithms.

pub mod ga;
