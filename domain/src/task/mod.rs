//! Task descriptors
//!
//! A task groups several problems under one descriptor file. Only problems
//! of type [`PROBLEM_TYPE`](crate::problem::PROBLEM_TYPE) are handled here;
//! other problem types belong to other plugins and are left alone.

use crate::problem::{MultifillProblem, PROBLEM_TYPE, ProblemContent, ProblemError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw task descriptor as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskDescriptor {
    pub name: String,
    /// Problems keyed by problem id
    pub problems: BTreeMap<String, ProblemContent>,
}

/// A problem that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemIssue {
    pub problem_id: String,
    pub error: ProblemError,
}

impl TaskDescriptor {
    /// Ids of the multifill problems in this task
    pub fn multifill_problem_ids(&self) -> impl Iterator<Item = &str> {
        self.problems
            .iter()
            .filter(|(_, content)| content.kind == PROBLEM_TYPE)
            .map(|(id, _)| id.as_str())
    }

    /// Number of problems handled by other problem types
    pub fn other_problem_count(&self) -> usize {
        self.problems
            .values()
            .filter(|content| content.kind != PROBLEM_TYPE)
            .count()
    }

    /// Build every multifill problem, failing on the first invalid one
    pub fn multifill_problems(&self) -> Result<Vec<MultifillProblem>, ProblemError> {
        self.multifill_problem_ids()
            .map(|id| MultifillProblem::new(id, &self.problems[id]))
            .collect()
    }

    /// Validate every multifill problem and collect all failures
    pub fn check(&self) -> Vec<ProblemIssue> {
        self.multifill_problem_ids()
            .filter_map(|id| {
                MultifillProblem::new(id, &self.problems[id])
                    .err()
                    .map(|error| ProblemIssue {
                        problem_id: id.to_string(),
                        error,
                    })
            })
            .collect()
    }
}
