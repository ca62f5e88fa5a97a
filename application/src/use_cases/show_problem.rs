//! Show problem use case
//!
//! Resolves which subtasks one learner sees for a problem.

use super::load_task::{LoadTaskError, LoadTaskUseCase};
use crate::ports::task_repository::TaskRepository;
use multifill_domain::{ScoreSpec, ShownSubtask};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while showing a problem
#[derive(Error, Debug)]
pub enum ShowProblemError {
    #[error(transparent)]
    LoadTask(#[from] LoadTaskError),

    #[error("Task {task_id} has no multifill problem {problem_id}")]
    ProblemNotFound { task_id: String, problem_id: String },
}

/// Input for showing a problem to one learner
#[derive(Debug, Clone)]
pub struct ShowProblemInput {
    pub task_id: String,
    pub problem_id: String,
    /// Opaque learner seed
    pub seed: String,
}

impl ShowProblemInput {
    pub fn new(
        task_id: impl Into<String>,
        problem_id: impl Into<String>,
        seed: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            problem_id: problem_id.into(),
            seed: seed.into(),
        }
    }
}

/// What the learner sees
#[derive(Debug, Clone, Serialize)]
pub struct ShowProblemOutput {
    pub task_id: String,
    pub problem_id: String,
    pub seed: String,
    pub name: String,
    pub header: String,
    pub subtasks: Vec<ShownSubtask>,
    pub score: ScoreSpec,
}

impl ShowProblemOutput {
    pub fn points_per_subtask(&self) -> f64 {
        self.score.points_per_subtask(self.subtasks.len())
    }
}

/// Use case for resolving a learner's view of a problem
pub struct ShowProblemUseCase<R: TaskRepository + ?Sized> {
    load_task: LoadTaskUseCase<R>,
}

impl<R: TaskRepository + ?Sized> ShowProblemUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            load_task: LoadTaskUseCase::new(repository),
        }
    }

    pub fn execute(&self, input: ShowProblemInput) -> Result<ShowProblemOutput, ShowProblemError> {
        let task = self.load_task.execute(&input.task_id)?;

        let problem =
            task.problem(&input.problem_id)
                .ok_or_else(|| ShowProblemError::ProblemNotFound {
                    task_id: input.task_id.clone(),
                    problem_id: input.problem_id.clone(),
                })?;

        let subtasks = problem.shown_subtasks(&input.seed);
        debug!(
            task = %input.task_id,
            problem = %input.problem_id,
            shown = ?subtasks.iter().map(|s| s.id).collect::<Vec<_>>(),
            "Selected subtasks"
        );

        Ok(ShowProblemOutput {
            name: problem.name().to_string(),
            header: problem.header().to_string(),
            score: *problem.score_spec(),
            subtasks,
            task_id: input.task_id,
            problem_id: input.problem_id,
            seed: input.seed,
        })
    }
}
