//! Problem definitions
//!
//! A [`MultifillProblem`] is built once from its stored [`ProblemContent`]
//! when a task is loaded. Building it validates the subtask string, checks
//! that it covers exactly the declared subtasks, and validates the score
//! string. The result is shared read-only by every learner request.

pub mod content;
pub mod error;
pub mod multifill;

pub use content::{ProblemContent, SubtaskContent};
pub use error::ProblemError;
pub use multifill::{MultifillProblem, PROBLEM_TYPE, ShownSubtask, Subtask};
