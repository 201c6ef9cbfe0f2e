//! GitHub repository identification from package.json `repository.url`

use crate::core::error::{ConfigError, PublishResult};
use std::fmt;

/// Host, owner and name of a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
  pub host: String,
  pub owner: String,
  pub repo: String,
}

impl RepositorySlug {
  /// Parse a `https://<host>/<owner>/<repo>.git` URL.
  ///
  /// The scheme and the `.git` suffix match case-insensitively. npm's
  /// `git+https://` form is accepted. Everything after the first path
  /// segment (the owner) is the repository name.
  pub fn parse(url: &str) -> PublishResult<Self> {
    let invalid = || ConfigError::InvalidRepositoryUrl { url: url.to_string() };

    let trimmed = url.trim();
    let without_git_plus = strip_prefix_ignore_case(trimmed, "git+").unwrap_or(trimmed);
    let rest = strip_prefix_ignore_case(without_git_plus, "https://")
      .or_else(|| strip_prefix_ignore_case(without_git_plus, "http://"))
      .ok_or_else(invalid)?;

    let path = strip_suffix_ignore_case(rest, ".git").ok_or_else(invalid)?;
    let (host, repo_path) = path.split_once('/').ok_or_else(invalid)?;
    let (owner, repo) = repo_path.split_once('/').ok_or_else(invalid)?;

    if host.is_empty() || owner.is_empty() || repo.is_empty() {
      return Err(invalid().into());
    }

    Ok(Self {
      host: host.to_string(),
      owner: owner.to_string(),
      repo: repo.to_string(),
    })
  }

  /// The only accepted value of `binary.host` for this repository
  pub fn download_prefix(&self) -> String {
    format!("https://{}/{}/{}/releases/download/", self.host, self.owner, self.repo)
  }

  /// REST API root serving this repository
  pub fn api_base_url(&self) -> String {
    format!("https://api.{}", self.host)
  }
}

impl fmt::Display for RepositorySlug {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.repo)
  }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
  let head = s.get(..prefix.len())?;
  head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
  let split = s.len().checked_sub(suffix.len())?;
  let tail = s.get(split..)?;
  tail.eq_ignore_ascii_case(suffix).then(|| &s[..split])
}
