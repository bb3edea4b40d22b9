//! Core building blocks shared by every command
//!
//! - **config**: relver configuration (relver.toml) parsing and validation
//! - **error**: Error types with exit codes and contextual help messages
//! - **fs**: Atomic file replacement
//! - **project**: Project root discovery
//! - **vcs**: Git operations abstraction (SystemGit) and revision lookup

pub mod config;
pub mod error;
pub mod fs;
pub mod project;
pub mod vcs;
