//! Infrastructure layer for multifill
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod tasks;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileOutputConfig, FileOutputFormat, FileTasksConfig};
pub use tasks::{DescriptorFormat, FsTaskRepository};
