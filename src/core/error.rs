//! Error types for relver with contextual messages and exit codes
//!
//! Every failure that reaches the user is a `RelverError`. Errors are grouped by
//! the component that raises them, carry an optional help hint, and map to a
//! process exit code so the copy command can report distinct statuses.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for relver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Release, config, argument and provisioning failures
  Failure = 1,
  /// Version record missing at the copy source
  SourceNotFound = 2,
  /// No destination directory could be determined for the copy
  DestinationUnresolved = 3,
  /// I/O failure while copying the record
  CopyFailed = 4,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for relver
#[derive(Debug)]
pub enum RelverError {
  /// Version record and version grammar errors
  Version(VersionError),

  /// Dependent manifest synchronization errors
  Manifest(ManifestError),

  /// Binary provisioning errors (only the fatal ones)
  Provision(ProvisionError),

  /// Version record relocation errors
  Relocate(RelocateError),

  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl RelverError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    RelverError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    RelverError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// Categorized errors already describe themselves and are returned
  /// unchanged, which keeps their exit code.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      RelverError::Message { message, context, help } => RelverError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      RelverError::Io(e) => RelverError::Message {
        message: format!("{}: {}", ctx_str, e),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      RelverError::Relocate(e) => e.exit_code(),
      _ => ExitCode::Failure,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      RelverError::Version(e) => e.help_message(),
      RelverError::Manifest(e) => e.help_message(),
      RelverError::Provision(e) => e.help_message(),
      RelverError::Relocate(e) => e.help_message(),
      RelverError::Config(e) => e.help_message(),
      RelverError::Git(e) => e.help_message(),
      RelverError::Message { help, .. } => help.clone(),
      RelverError::Io(_) => None,
    }
  }
}

impl fmt::Display for RelverError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RelverError::Version(e) => write!(f, "{}", e),
      RelverError::Manifest(e) => write!(f, "{}", e),
      RelverError::Provision(e) => write!(f, "{}", e),
      RelverError::Relocate(e) => write!(f, "{}", e),
      RelverError::Config(e) => write!(f, "{}", e),
      RelverError::Git(e) => write!(f, "{}", e),
      RelverError::Io(e) => write!(f, "I/O error: {}", e),
      RelverError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for RelverError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      RelverError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for RelverError {
  fn from(err: io::Error) -> Self {
    RelverError::Io(err)
  }
}

impl From<String> for RelverError {
  fn from(msg: String) -> Self {
    RelverError::message(msg)
  }
}

impl From<&str> for RelverError {
  fn from(msg: &str) -> Self {
    RelverError::message(msg)
  }
}

impl From<serde_json::Error> for RelverError {
  fn from(err: serde_json::Error) -> Self {
    RelverError::message(format!("JSON error: {}", err))
  }
}

impl From<toml_edit::TomlError> for RelverError {
  fn from(err: toml_edit::TomlError) -> Self {
    RelverError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for RelverError {
  fn from(err: toml_edit::de::Error) -> Self {
    RelverError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<regex::Error> for RelverError {
  fn from(err: regex::Error) -> Self {
    RelverError::message(format!("Pattern error: {}", err))
  }
}

impl From<reqwest::Error> for RelverError {
  fn from(err: reqwest::Error) -> Self {
    RelverError::message(format!("HTTP error: {}", err))
  }
}

impl From<tempfile::PersistError> for RelverError {
  fn from(err: tempfile::PersistError) -> Self {
    RelverError::Io(err.error)
  }
}

/// Version record and version string errors
#[derive(Debug)]
pub enum VersionError {
  /// Version string does not match MAJOR.MINOR.PATCH[-PRERELEASE]
  InvalidVersionFormat { version: String },

  /// Bump kind is not one of major/minor/patch
  UnrecognizedBumpKind { kind: String },

  /// Record file exists but is not a valid record document
  MalformedRecord { path: PathBuf, reason: String },

  /// Record file does not exist
  RecordNotFound { path: PathBuf },
}

impl VersionError {
  fn help_message(&self) -> Option<String> {
    match self {
      VersionError::InvalidVersionFormat { .. } => {
        Some("Fix the \"version\" field by hand, e.g. \"1.2.3\" or \"1.2.3-beta.1\", then run the release again.".to_string())
      }
      VersionError::UnrecognizedBumpKind { .. } => Some("Use one of: major, minor, patch.".to_string()),
      VersionError::MalformedRecord { .. } => {
        Some("The record must be a JSON object with a string \"version\" and an integer \"build\".".to_string())
      }
      VersionError::RecordNotFound { .. } => {
        Some("Run relver from the project root, or create project-version.json there.".to_string())
      }
    }
  }
}

impl fmt::Display for VersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionError::InvalidVersionFormat { version } => {
        write!(f, "Invalid version format: '{}' (expected MAJOR.MINOR.PATCH[-PRERELEASE])", version)
      }
      VersionError::UnrecognizedBumpKind { kind } => {
        write!(f, "Unknown bump type: {} (expected: major|minor|patch)", kind)
      }
      VersionError::MalformedRecord { path, reason } => {
        write!(f, "Malformed version record {}: {}", path.display(), reason)
      }
      VersionError::RecordNotFound { path } => {
        write!(f, "Version record not found: {}", path.display())
      }
    }
  }
}

/// Dependent manifest errors
#[derive(Debug)]
pub enum ManifestError {
  /// Configured manifest does not exist
  ManifestNotFound { path: PathBuf },

  /// Manifest could not be written back
  ManifestUnwritable { path: PathBuf, reason: String },

  /// Manifest has no version field the strategy can update
  VersionFieldMissing { path: PathBuf, strategy: String },

  /// Manifest could not be parsed by a structured strategy
  MalformedManifest { path: PathBuf, reason: String },
}

impl ManifestError {
  fn help_message(&self) -> Option<String> {
    match self {
      ManifestError::ManifestNotFound { .. } => {
        Some("Create the file or remove it from [[manifests]] in relver.toml.".to_string())
      }
      ManifestError::ManifestUnwritable { .. } => Some(
        "Check file permissions. Manifests synced before this one were already updated; re-run the release to retry."
          .to_string(),
      ),
      ManifestError::VersionFieldMissing { .. } => {
        Some("Add a version = \"0.0.0\" line, or pick another strategy in relver.toml.".to_string())
      }
      ManifestError::MalformedManifest { .. } => None,
    }
  }
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestError::ManifestNotFound { path } => {
        write!(f, "Dependent manifest not found: {}", path.display())
      }
      ManifestError::ManifestUnwritable { path, reason } => {
        write!(f, "Failed to write manifest {}: {}", path.display(), reason)
      }
      ManifestError::VersionFieldMissing { path, strategy } => {
        write!(f, "No version field found in {} ({} strategy)", path.display(), strategy)
      }
      ManifestError::MalformedManifest { path, reason } => {
        write!(f, "Failed to parse manifest {}: {}", path.display(), reason)
      }
    }
  }
}

/// Fatal provisioning errors
///
/// Network failures are not errors: they are reported through
/// `ProvisionOutcome` and never abort an installation.
#[derive(Debug)]
pub enum ProvisionError {
  /// No prebuilt artifact exists for this platform
  UnsupportedPlatform { platform: String },

  /// Local filesystem failure while placing the binary
  Filesystem { path: PathBuf, reason: String },
}

impl ProvisionError {
  fn help_message(&self) -> Option<String> {
    match self {
      ProvisionError::UnsupportedPlatform { .. } => {
        Some("Prebuilt binaries exist for windows, macos and linux (x86_64). Build from source instead.".to_string())
      }
      ProvisionError::Filesystem { .. } => Some("Check that the install directory is writable.".to_string()),
    }
  }
}

impl fmt::Display for ProvisionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ProvisionError::UnsupportedPlatform { platform } => {
        write!(f, "Unsupported platform: {}", platform)
      }
      ProvisionError::Filesystem { path, reason } => {
        write!(f, "Failed to install binary at {}: {}", path.display(), reason)
      }
    }
  }
}

/// Version record relocation errors
#[derive(Debug)]
pub enum RelocateError {
  /// Record does not exist at the resolved source
  SourceNotFound { path: PathBuf },

  /// No destination directory could be determined
  DestinationUnresolved { reason: String },

  /// I/O failure while creating the destination or copying
  CopyFailed { from: PathBuf, to: PathBuf, reason: String },
}

impl RelocateError {
  fn exit_code(&self) -> ExitCode {
    match self {
      RelocateError::SourceNotFound { .. } => ExitCode::SourceNotFound,
      RelocateError::DestinationUnresolved { .. } => ExitCode::DestinationUnresolved,
      RelocateError::CopyFailed { .. } => ExitCode::CopyFailed,
    }
  }

  fn help_message(&self) -> Option<String> {
    match self {
      RelocateError::SourceNotFound { .. } => Some("Pass the record explicitly with --source <path>.".to_string()),
      RelocateError::DestinationUnresolved { .. } => {
        Some("Pass the target explicitly with --out-dir <dir> or --binary <path>.".to_string())
      }
      RelocateError::CopyFailed { .. } => None,
    }
  }
}

impl fmt::Display for RelocateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RelocateError::SourceNotFound { path } => {
        write!(f, "Version record not found at {}", path.display())
      }
      RelocateError::DestinationUnresolved { reason } => {
        write!(f, "Could not determine destination directory: {}", reason)
      }
      RelocateError::CopyFailed { from, to, reason } => {
        write!(f, "Failed to copy {} to {}: {}", from.display(), to.display(), reason)
      }
    }
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file exists but could not be parsed
  Parse { path: PathBuf, reason: String },

  /// Config parsed but failed validation
  Invalid { reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Parse { .. } => Some("Fix the TOML syntax, or delete the file to use the defaults.".to_string()),
      ConfigError::Invalid { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Parse { path, reason } => {
        write!(f, "Failed to parse {}: {}", path.display(), reason)
      }
      ConfigError::Invalid { reason } => {
        write!(f, "Invalid relver configuration: {}", reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// git executable could not be started
  Unavailable { reason: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::Unavailable { .. } => Some("Install git and make sure it is on PATH.".to_string()),
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr.trim_end())
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::Unavailable { reason } => {
        write!(f, "git is not available: {}", reason)
      }
    }
  }
}

/// Result type alias for relver
pub type RelverResult<T> = Result<T, RelverError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> RelverResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> RelverResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<RelverError>,
{
  fn context(self, ctx: impl Into<String>) -> RelverResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> RelverResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &RelverError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
