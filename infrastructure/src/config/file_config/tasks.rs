//! Task storage configuration from TOML (`[tasks]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw task storage configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTasksConfig {
    /// Directory holding one sub-directory per task
    pub root: PathBuf,
    /// Descriptor file name inside each task directory
    pub descriptor: String,
}

impl Default for FileTasksConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("tasks"),
            descriptor: "task.yaml".to_string(),
        }
    }
}
