//! Helpers shared between use cases

use crate::ports::task_repository::{RepositoryError, TaskRepository};
use multifill_domain::TaskDescriptor;
use tracing::debug;

/// Load a task descriptor, logging what it contains
pub(crate) fn load_descriptor<R: TaskRepository + ?Sized>(
    repository: &R,
    task_id: &str,
) -> Result<TaskDescriptor, RepositoryError> {
    let descriptor = repository.load_task(task_id)?;
    debug!(
        task = task_id,
        problems = descriptor.problems.len(),
        other = descriptor.other_problem_count(),
        "Loaded task descriptor"
    );
    Ok(descriptor)
}
