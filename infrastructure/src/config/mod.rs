//! Configuration file loading for multifill
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MULTIFILL_`-prefixed environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./multifill.toml` or `./.multifill.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/multifill/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileOutputConfig, FileOutputFormat, FileTasksConfig};
pub use loader::ConfigLoader;
