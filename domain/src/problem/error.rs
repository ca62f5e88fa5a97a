//! Problem construction errors

use crate::score::ScoreSpecError;
use crate::subtask::SubtaskSpecError;
use thiserror::Error;

/// Reasons a problem definition refuses to load
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    #[error("Multifill problem {problem_id} does not have any subtasks")]
    NoSubtasks { problem_id: String },

    #[error("Problem {problem_id}: subtask {index} is missing text")]
    MissingText { problem_id: String, index: usize },

    #[error("Problem {problem_id} has type '{kind}', expected 'multifill'")]
    WrongType { problem_id: String, kind: String },

    #[error("Problem {problem_id}: {source}")]
    SubtaskString {
        problem_id: String,
        #[source]
        source: SubtaskSpecError,
    },

    #[error("Problem {problem_id}: {source}")]
    ScoreString {
        problem_id: String,
        #[source]
        source: ScoreSpecError,
    },

    #[error("Subtask key '{key}' is not an index")]
    InvalidFormKey { key: String },

    #[error("Subtask '{key}' is not an object")]
    InvalidFormSubtask { key: String },
}

impl ProblemError {
    /// Id of the problem the error belongs to, when known
    pub fn problem_id(&self) -> Option<&str> {
        match self {
            ProblemError::NoSubtasks { problem_id }
            | ProblemError::MissingText { problem_id, .. }
            | ProblemError::WrongType { problem_id, .. }
            | ProblemError::SubtaskString { problem_id, .. }
            | ProblemError::ScoreString { problem_id, .. } => Some(problem_id),
            ProblemError::InvalidFormKey { .. } | ProblemError::InvalidFormSubtask { .. } => None,
        }
    }
}
