//! Check task use case
//!
//! Validates every multifill problem of one or all tasks and reports each
//! failure instead of stopping at the first.

use super::shared::load_descriptor;
use crate::ports::task_repository::{RepositoryError, TaskRepository};
use multifill_domain::ProblemIssue;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that prevent a task from being checked at all
#[derive(Error, Debug)]
pub enum CheckTaskError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Outcome of checking one task
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub task_id: String,
    /// Number of multifill problems validated
    pub checked: usize,
    pub issues: Vec<ProblemIssue>,
}

impl TaskReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Use case for validating task descriptors
pub struct CheckTaskUseCase<R: TaskRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: TaskRepository + ?Sized> CheckTaskUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn execute(&self, task_id: &str) -> Result<TaskReport, CheckTaskError> {
        let descriptor = load_descriptor(&*self.repository, task_id)?;
        let checked = descriptor.multifill_problem_ids().count();
        let issues = descriptor.check();

        for issue in &issues {
            warn!(
                task = task_id,
                problem = %issue.problem_id,
                error = %issue.error,
                "Invalid problem"
            );
        }
        debug!(task = task_id, checked, issues = issues.len(), "Checked task");

        Ok(TaskReport {
            task_id: task_id.to_string(),
            checked,
            issues,
        })
    }

    /// Check every task the repository knows about
    pub fn execute_all(&self) -> Result<Vec<TaskReport>, CheckTaskError> {
        let task_ids = self.repository.list_tasks()?;
        info!(tasks = task_ids.len(), "Checking all tasks");

        task_ids.iter().map(|id| self.execute(id)).collect()
    }
}
