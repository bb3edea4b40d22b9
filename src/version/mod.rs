//! Canonical version record and the operations that mutate it
//!
//! - **record**: `VersionRecord` and `VersionStore` (load/update/save with atomic replace)
//! - **semver**: version grammar and `BumpKind`
//! - **bump**: `VersionBumper`, next semantic version
//! - **stamp**: `BuildStamper`, build counter and last revision
//! - **resolve**: which version an installation reports at runtime

pub mod bump;
pub mod record;
pub mod resolve;
pub mod semver;
pub mod stamp;

pub use bump::VersionBumper;
pub use record::{VersionRecord, VersionStore};
pub use self::semver::BumpKind;
pub use stamp::BuildStamper;
