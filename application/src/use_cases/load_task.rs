//! Load task use case
//!
//! Builds every multifill problem of a task. Loading fails fast: a task with
//! one malformed or inconsistent problem refuses to load until corrected.

use super::shared::load_descriptor;
use crate::ports::task_repository::{RepositoryError, TaskRepository};
use multifill_domain::{MultifillProblem, ProblemError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while loading a task
#[derive(Error, Debug)]
pub enum LoadTaskError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Task {task_id} refused to load: {source}")]
    InvalidProblem {
        task_id: String,
        #[source]
        source: ProblemError,
    },
}

/// A task whose multifill problems are all valid
#[derive(Debug, Clone)]
pub struct LoadedTask {
    pub task_id: String,
    pub name: String,
    pub problems: Vec<MultifillProblem>,
    /// Problems of other types, left to their own plugins
    pub skipped: usize,
}

impl LoadedTask {
    pub fn problem(&self, problem_id: &str) -> Option<&MultifillProblem> {
        self.problems.iter().find(|p| p.id() == problem_id)
    }
}

/// Use case for loading a task's multifill problems
pub struct LoadTaskUseCase<R: TaskRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: TaskRepository + ?Sized> LoadTaskUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn execute(&self, task_id: &str) -> Result<LoadedTask, LoadTaskError> {
        let descriptor = load_descriptor(&*self.repository, task_id)?;

        let problems = descriptor.multifill_problems().map_err(|source| {
            warn!(task = task_id, error = %source, "Task refused to load");
            LoadTaskError::InvalidProblem {
                task_id: task_id.to_string(),
                source,
            }
        })?;

        let skipped = descriptor.other_problem_count();
        info!(
            task = task_id,
            problems = problems.len(),
            skipped,
            "Loaded multifill problems"
        );

        Ok(LoadedTask {
            task_id: task_id.to_string(),
            name: descriptor.name.clone(),
            skipped,
            problems,
        })
    }
}
