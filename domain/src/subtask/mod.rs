//! Subtask selection
//!
//! A problem owns an ordered list of subtasks. The subtask string decides
//! which of them a learner sees and in what order:
//!
//! - [`grammar`] parses and validates the string into a [`SubtaskSpec`]
//! - [`rng`] derives a portable generator from the problem id and learner seed
//! - [`sampler`] draws the learner's subtask indices from a [`SubtaskSpec`]

pub mod grammar;
pub mod rng;
pub mod sampler;

pub use grammar::{PickGroup, Segment, SubtaskSpec, SubtaskSpecError};
pub use rng::SeededRng;
