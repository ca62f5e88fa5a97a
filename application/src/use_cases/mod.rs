//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod check_task;
pub mod load_task;
pub(crate) mod shared;
pub mod show_problem;
