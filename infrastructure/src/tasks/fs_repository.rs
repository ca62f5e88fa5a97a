//! Filesystem task repository
//!
//! Reads `<root>/<task_id>/<descriptor>` for each task.

use super::format::DescriptorFormat;
use multifill_application::ports::task_repository::{RepositoryError, TaskRepository};
use multifill_domain::TaskDescriptor;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Task repository backed by a directory tree
#[derive(Debug, Clone)]
pub struct FsTaskRepository {
    root: PathBuf,
    descriptor: String,
}

impl FsTaskRepository {
    pub fn new(root: impl Into<PathBuf>, descriptor: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            descriptor: descriptor.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Path of the descriptor file of `task_id`
    pub fn descriptor_path(&self, task_id: &str) -> PathBuf {
        self.root.join(task_id).join(&self.descriptor)
    }

    fn format(&self, task_id: &str) -> Result<DescriptorFormat, RepositoryError> {
        DescriptorFormat::from_path(Path::new(&self.descriptor)).ok_or_else(|| {
            RepositoryError::Parse {
                task_id: task_id.to_string(),
                message: format!("unsupported descriptor file '{}'", self.descriptor),
            }
        })
    }

    /// Task ids are single directory names
    fn is_valid_task_id(task_id: &str) -> bool {
        !task_id.is_empty()
            && task_id != "."
            && task_id != ".."
            && !task_id.contains(['/', '\\'])
    }
}

impl TaskRepository for FsTaskRepository {
    fn load_task(&self, task_id: &str) -> Result<TaskDescriptor, RepositoryError> {
        if !Self::is_valid_task_id(task_id) {
            return Err(RepositoryError::NotFound(task_id.to_string()));
        }

        let format = self.format(task_id)?;
        let path = self.descriptor_path(task_id);
        debug!(task = task_id, path = %path.display(), %format, "Reading task descriptor");

        let text = fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => RepositoryError::NotFound(task_id.to_string()),
            _ => RepositoryError::Io {
                task_id: task_id.to_string(),
                source,
            },
        })?;

        format.parse(&text).map_err(|message| RepositoryError::Parse {
            task_id: task_id.to_string(),
            message,
        })
    }

    fn list_tasks(&self) -> Result<Vec<String>, RepositoryError> {
        let io_error = |source: std::io::Error| RepositoryError::Io {
            task_id: self.root.display().to_string(),
            source,
        };

        let mut tasks = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(io_error)? {
            let entry = entry.map_err(io_error)?;
            let path = entry.path();
            if !path.join(&self.descriptor).is_file() {
                trace!(path = %path.display(), "Skipping directory without descriptor");
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                tasks.push(name.to_string());
            }
        }

        tasks.sort();
        Ok(tasks)
    }
}
