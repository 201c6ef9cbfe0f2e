//! Error types for prebuild-publish with contextual messages and exit codes
//!
//! Every failure is fatal: errors surface to `main`, which prints the message
//! plus a help hint and exits with the category's exit code. Rerunning the
//! tool is the recovery path, since assets that already exist are skipped.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for prebuild-publish
///
/// 2 is left to clap, which exits with it on usage errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Configuration error (token, package.json, repository, binary fields)
  Config = 1,
  /// Staging error (stage directory missing, empty, unreadable)
  Staging = 3,
  /// Remote service error (network, auth, API status, bad response)
  Remote = 4,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for prebuild-publish
#[derive(Debug)]
pub enum PublishError {
  /// Configuration errors
  Config(ConfigError),

  /// Local staging directory errors
  Staging(StagingError),

  /// GitHub API errors
  Remote(RemoteError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl PublishError {
  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    PublishError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      PublishError::Message { message, context, help } => PublishError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      PublishError::Io(err) => PublishError::Message {
        message: format!("{}: {}", ctx_str, err),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      PublishError::Config(_) => ExitCode::Config,
      PublishError::Staging(_) => ExitCode::Staging,
      PublishError::Remote(_) => ExitCode::Remote,
      PublishError::Io(_) => ExitCode::Staging,
      PublishError::Message { .. } => ExitCode::Config,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      PublishError::Config(e) => e.help_message(),
      PublishError::Staging(e) => e.help_message(),
      PublishError::Remote(e) => e.help_message(),
      PublishError::Message { help, .. } => help.clone(),
      PublishError::Io(_) => None,
    }
  }
}

impl fmt::Display for PublishError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PublishError::Config(e) => write!(f, "{}", e),
      PublishError::Staging(e) => write!(f, "{}", e),
      PublishError::Remote(e) => write!(f, "{}", e),
      PublishError::Io(e) => write!(f, "I/O error: {}", e),
      PublishError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for PublishError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      PublishError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for PublishError {
  fn from(err: io::Error) -> Self {
    PublishError::Io(err)
  }
}

impl From<ConfigError> for PublishError {
  fn from(err: ConfigError) -> Self {
    PublishError::Config(err)
  }
}

impl From<StagingError> for PublishError {
  fn from(err: StagingError) -> Self {
    PublishError::Staging(err)
  }
}

impl From<RemoteError> for PublishError {
  fn from(err: RemoteError) -> Self {
    PublishError::Remote(err)
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Authentication token environment variable not set
  TokenNotFound { var: String },

  /// package.json could not be read or is not valid JSON
  ManifestUnreadable { path: PathBuf, reason: String },

  /// Missing required field in package.json
  MissingField { field: String },

  /// repository.url is not a GitHub style `https://host/owner/repo.git` URL
  InvalidRepositoryUrl { url: String },

  /// binary.host does not match the release download prefix of the repository
  HostMismatch { expected: String, actual: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::TokenNotFound { var } => Some(format!(
        "Create a GitHub token with `repo` scope and export it: export {}=<token>",
        var
      )),
      ConfigError::InvalidRepositoryUrl { .. } => Some(
        "Set repository.url in package.json to the form https://github.com/<owner>/<repo>.git".to_string(),
      ),
      ConfigError::HostMismatch { expected, .. } => {
        Some(format!("Set binary.host in package.json to \"{}\"", expected))
      }
      ConfigError::MissingField { field } if field == "binary.remote_path" => {
        Some("binary.remote_path names the release tag, e.g. \"v{version}\"".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::TokenNotFound { var } => {
        write!(f, "{} environment variable not found", var)
      }
      ConfigError::ManifestUnreadable { path, reason } => {
        write!(f, "Unable to read {} ({})", path.display(), reason)
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing {} in package.json", field)
      }
      ConfigError::InvalidRepositoryUrl { url } => {
        write!(
          f,
          "A correctly formatted GitHub repository.url was not found within package.json: {}",
          url
        )
      }
      ConfigError::HostMismatch { expected, actual } => {
        write!(f, "Invalid binary.host '{}': Should be {}", actual, expected)
      }
    }
  }
}

/// Local staging directory errors
#[derive(Debug)]
pub enum StagingError {
  /// Stage directory does not exist or cannot be listed
  DirectoryUnreadable { path: PathBuf, reason: String },

  /// Stage directory contains no files
  Empty { path: PathBuf },

  /// A staged file could not be read
  FileUnreadable { path: PathBuf, reason: String },

  /// A staged file name is not valid UTF-8 and cannot name an asset
  InvalidFileName { path: PathBuf },
}

impl StagingError {
  fn help_message(&self) -> Option<String> {
    match self {
      StagingError::DirectoryUnreadable { .. } | StagingError::Empty { .. } => Some(
        "Build and package the binaries first (e.g. `node-pre-gyp rebuild && node-pre-gyp package`).".to_string(),
      ),
      StagingError::InvalidFileName { .. } => {
        Some("Rename the file using UTF-8 characters only; GitHub asset names are UTF-8.".to_string())
      }
      StagingError::FileUnreadable { .. } => None,
    }
  }
}

impl fmt::Display for StagingError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StagingError::DirectoryUnreadable { path, reason } => {
        write!(f, "Unable to list the stage directory {} ({})", path.display(), reason)
      }
      StagingError::Empty { path } => {
        write!(f, "No files found within the stage directory: {}", path.display())
      }
      StagingError::FileUnreadable { path, reason } => {
        write!(f, "Unable to read staged file {} ({})", path.display(), reason)
      }
      StagingError::InvalidFileName { path } => {
        write!(f, "Staged file name is not valid UTF-8: {}", path.display())
      }
    }
  }
}

/// GitHub API errors
#[derive(Debug)]
pub enum RemoteError {
  /// Request never produced a response (DNS, TLS, connection reset, ...)
  Transport { operation: String, reason: String },

  /// GitHub answered with a non-success status
  Status {
    operation: String,
    status: u16,
    message: String,
  },

  /// Response body did not have the expected shape
  InvalidResponse { operation: String, reason: String },
}

impl RemoteError {
  /// Transport failure for `operation`
  pub fn transport(operation: &str, err: impl fmt::Display) -> Self {
    RemoteError::Transport {
      operation: operation.to_string(),
      reason: err.to_string(),
    }
  }

  /// Malformed response for `operation`
  pub fn invalid_response(operation: &str, err: impl fmt::Display) -> Self {
    RemoteError::InvalidResponse {
      operation: operation.to_string(),
      reason: err.to_string(),
    }
  }

  fn help_message(&self) -> Option<String> {
    match self {
      RemoteError::Status { status: 401, .. } => {
        Some("GitHub rejected the token. Check NODE_PRE_GYP_GITHUB_TOKEN.".to_string())
      }
      RemoteError::Status { status: 403, .. } => {
        Some("The token lacks permission for this repository, or the rate limit was hit.".to_string())
      }
      RemoteError::Status { status: 404, .. } => {
        Some("Check repository.url in package.json and that the token can see the repository.".to_string())
      }
      RemoteError::Status { status: 422, .. } => Some(
        "GitHub refused the request. An asset with the same name may already exist; delete it on GitHub to replace it."
          .to_string(),
      ),
      _ => None,
    }
  }
}

impl fmt::Display for RemoteError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RemoteError::Transport { operation, reason } => {
        write!(f, "GitHub request failed ({}): {}", operation, reason)
      }
      RemoteError::Status {
        operation,
        status,
        message,
      } => {
        write!(f, "GitHub returned {} ({}): {}", status, operation, message)
      }
      RemoteError::InvalidResponse { operation, reason } => {
        write!(f, "Unexpected GitHub response ({}): {}", operation, reason)
      }
    }
  }
}

/// Result type alias for prebuild-publish
pub type PublishResult<T> = Result<T, PublishError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> PublishResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<PublishError>,
{
  fn context(self, ctx: impl Into<String>) -> PublishResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &PublishError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
