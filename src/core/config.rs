//! Invocation settings and package.json validation
//!
//! `PublishSettings` carries everything taken from the process environment
//! (working directory, token, CLI flags). `Manifest` is the subset of
//! package.json the publisher reads; `Manifest::validate` turns it into a
//! `PublishTarget` or fails with a `ConfigError`.

use crate::core::error::{ConfigError, PublishError, PublishResult};
use crate::release::repository::RepositorySlug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the GitHub token
pub const TOKEN_ENV: &str = "NODE_PRE_GYP_GITHUB_TOKEN";

/// Environment variable overriding the GitHub API root (GitHub Enterprise)
pub const API_URL_ENV: &str = "NODE_PRE_GYP_GITHUB_API_URL";

/// Manifest location relative to the working directory
pub const MANIFEST_FILE: &str = "package.json";

/// Stage root relative to the working directory
pub const STAGE_DIR: &str = "build/stage";

/// Placeholder substituted in `binary.remote_path`
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Settings for one publish run, sourced from the invocation environment
#[derive(Debug, Clone)]
pub struct PublishSettings {
  /// Directory containing package.json and build/stage
  pub root: PathBuf,
  /// GitHub token (`None` when the variable is unset or empty)
  pub token: Option<String>,
  /// Create new releases as drafts
  pub draft: bool,
  /// Per-file logging
  pub verbose: bool,
  /// API root override; derived from the repository host when `None`
  pub api_url: Option<String>,
}

impl PublishSettings {
  /// Read the token and API override from the process environment
  pub fn from_env(root: PathBuf, draft: bool, verbose: bool) -> Self {
    Self {
      root,
      token: non_empty_var(TOKEN_ENV),
      draft,
      verbose,
      api_url: non_empty_var(API_URL_ENV),
    }
  }

  /// The token, or a configuration error naming the variable
  pub fn require_token(&self) -> PublishResult<&str> {
    self.token.as_deref().ok_or_else(|| {
      ConfigError::TokenNotFound {
        var: TOKEN_ENV.to_string(),
      }
      .into()
    })
  }
}

fn non_empty_var(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// The fields of package.json used for publishing
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub version: Option<String>,
  #[serde(default)]
  pub repository: Option<RepositoryField>,
  #[serde(default)]
  pub binary: Option<BinaryConfig>,
}

/// `repository` is either `{ "url": ... }` or npm's shorthand string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RepositoryField {
  Url(String),
  Object {
    #[serde(default)]
    url: Option<String>,
  },
}

impl RepositoryField {
  fn url(&self) -> Option<&str> {
    match self {
      RepositoryField::Url(url) => Some(url.as_str()),
      RepositoryField::Object { url } => url.as_deref(),
    }
  }
}

/// node-pre-gyp's `binary` block
#[derive(Debug, Clone, Deserialize)]
pub struct BinaryConfig {
  #[serde(default)]
  pub host: Option<String>,
  #[serde(default)]
  pub remote_path: Option<String>,
}

/// Validated publish target derived from the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
  pub package_name: String,
  pub version: String,
  pub repository: RepositorySlug,
  /// `binary.remote_path` with `{version}` substituted
  pub tag_name: String,
}

impl PublishTarget {
  /// Directory holding the binaries staged for this tag
  pub fn stage_dir(&self, root: &Path) -> PathBuf {
    root.join(STAGE_DIR).join(&self.tag_name)
  }
}

impl Manifest {
  /// Read and parse `<root>/package.json`
  pub fn load(root: &Path) -> PublishResult<Self> {
    let path = root.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path).map_err(|e| ConfigError::ManifestUnreadable {
      path: path.clone(),
      reason: e.to_string(),
    })?;
    Self::from_json(&path, &content)
  }

  /// Parse manifest JSON text read from `path`
  pub fn from_json(path: &Path, content: &str) -> PublishResult<Self> {
    serde_json::from_str(content).map_err(|e| {
      ConfigError::ManifestUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
      }
      .into()
    })
  }

  /// Check repository and binary fields and compute the release tag
  pub fn validate(&self) -> PublishResult<PublishTarget> {
    let url = self
      .repository
      .as_ref()
      .and_then(RepositoryField::url)
      .filter(|u| !u.trim().is_empty())
      .ok_or_else(|| missing("repository.url"))?;
    let repository = RepositorySlug::parse(url)?;

    let binary = self.binary.as_ref();
    let host = binary
      .and_then(|b| b.host.as_deref())
      .filter(|h| !h.is_empty())
      .ok_or_else(|| missing("binary.host"))?;

    let expected = repository.download_prefix();
    if host != expected {
      return Err(
        ConfigError::HostMismatch {
          expected,
          actual: host.to_string(),
        }
        .into(),
      );
    }

    let remote_path = binary
      .and_then(|b| b.remote_path.as_deref())
      .filter(|p| !p.is_empty())
      .ok_or_else(|| missing("binary.remote_path"))?;

    let version = self
      .version
      .as_deref()
      .map(str::trim)
      .filter(|v| !v.is_empty())
      .ok_or_else(|| missing("version"))?;

    if semver::Version::parse(version).is_err() {
      log::warn!("package.json version '{}' is not a valid semantic version", version);
    }

    Ok(PublishTarget {
      package_name: self.name.clone(),
      version: version.to_string(),
      repository,
      tag_name: expand_remote_path(remote_path, version),
    })
  }
}

/// Substitute every `{version}` in a `binary.remote_path` template
pub fn expand_remote_path(remote_path: &str, version: &str) -> String {
  remote_path.replace(VERSION_PLACEHOLDER, version)
}

fn missing(field: &str) -> PublishError {
  ConfigError::MissingField {
    field: field.to_string(),
  }
  .into()
}
