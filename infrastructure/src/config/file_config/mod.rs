//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod output;
mod tasks;

pub use output::{FileOutputConfig, FileOutputFormat};
pub use tasks::FileTasksConfig;

use crate::tasks::DescriptorFormat;
use multifill_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Task storage settings
    pub tasks: FileTasksConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.tasks.root.as_os_str().is_empty() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::EmptyTasksRoot,
                message: "tasks.root: must not be empty".to_string(),
            });
        }

        if DescriptorFormat::from_path(Path::new(&self.tasks.descriptor)).is_none() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::UnsupportedDescriptor {
                    descriptor: self.tasks.descriptor.clone(),
                },
                message: format!(
                    "tasks.descriptor: '{}' must end in .yaml, .yml, .toml or .json",
                    self.tasks.descriptor
                ),
            });
        }

        issues
    }
}
