//! CLI commands for relver
//!
//! - **release**: bump, stamp and sync in one step (`--dry-run` to preview)
//! - **copy_version**: place the version record next to a built binary
//! - **postinstall**: download the prebuilt binary for this platform
//! - **show**: print the version this installation reports

pub mod copy_version;
pub mod postinstall;
pub mod release;
pub mod show;

pub use copy_version::run_copy_version;
pub use postinstall::run_postinstall;
pub use release::run_release;
pub use show::run_show;
