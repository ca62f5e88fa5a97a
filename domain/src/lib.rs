//! Domain layer for multifill
//!
//! This crate contains the subtask selection language, its deterministic
//! sampler, score constraints and the multifill problem definition.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Subtask string
//!
//! A compact grammar (`1;1/2,1`) describing which subtasks a learner sees:
//!
//! - **Segment** (`;`): order-preserving; segments never change position
//! - **Pick group** (`,`): `pull/bag` draws; picks inside a segment are shuffled together
//!
//! ## Sampling
//!
//! Selection is seeded by the problem id and an opaque learner seed, so a
//! learner sees the same subtasks on every request while different learners
//! normally see different ones.
//!
//! ## Score string
//!
//! `min/expected/total` thresholds that grading relies on.

pub mod config;
pub mod problem;
pub mod score;
pub mod subtask;
pub mod task;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use problem::{
    MultifillProblem, PROBLEM_TYPE, ProblemContent, ProblemError, ShownSubtask, Subtask,
    SubtaskContent,
};
pub use score::{ScoreSpec, ScoreSpecError};
pub use subtask::{PickGroup, SeededRng, Segment, SubtaskSpec, SubtaskSpecError};
pub use task::{ProblemIssue, TaskDescriptor};
