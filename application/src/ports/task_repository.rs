//! Task repository port
//!
//! Defines how the application layer obtains task descriptors.
//! Implementations (adapters) live in the infrastructure layer.

use multifill_domain::TaskDescriptor;
use thiserror::Error;

/// Errors that can occur while reading task descriptors
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Failed to read task {task_id}: {source}")]
    Io {
        task_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse task {task_id}: {message}")]
    Parse { task_id: String, message: String },
}

/// Source of task descriptors
pub trait TaskRepository: Send + Sync {
    /// Load the descriptor of one task
    fn load_task(&self, task_id: &str) -> Result<TaskDescriptor, RepositoryError>;

    /// Ids of every task available, sorted
    fn list_tasks(&self) -> Result<Vec<String>, RepositoryError>;
}
