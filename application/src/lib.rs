//! Application layer for multifill
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::task_repository::{RepositoryError, TaskRepository};
pub use use_cases::check_task::{CheckTaskError, CheckTaskUseCase, TaskReport};
pub use use_cases::load_task::{LoadTaskError, LoadTaskUseCase, LoadedTask};
pub use use_cases::show_problem::{
    ShowProblemError, ShowProblemInput, ShowProblemOutput, ShowProblemUseCase,
};
