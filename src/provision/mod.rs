//! Prebuilt binary provisioning
//!
//! - **platform**: closed set of supported platforms and their artifact names
//! - **fetch**: the download capability (`Fetcher`) and its HTTP implementation
//! - **provisioner**: URL construction, streaming to disk, degradation policy

pub mod fetch;
pub mod platform;
pub mod provisioner;

pub use fetch::HttpFetcher;
pub use platform::Platform;
pub use provisioner::{BinaryProvisioner, ProvisionOutcome};
