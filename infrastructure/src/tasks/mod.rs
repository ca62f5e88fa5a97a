//! Task descriptor storage
//!
//! Tasks live in one directory each under a common root, described by a
//! single descriptor file written in YAML, TOML or JSON.

mod format;
mod fs_repository;

pub use format::DescriptorFormat;
pub use fs_repository::FsTaskRepository;
