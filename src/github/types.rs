//! GitHub release API payloads (only the fields the publisher reads)

use serde::{Deserialize, Serialize};

/// A GitHub release
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
  pub id: u64,
  pub tag_name: String,
  /// RFC 6570 template, e.g. `https://uploads.github.com/repos/o/r/releases/1/assets{?name,label}`
  pub upload_url: String,
  #[serde(default)]
  pub html_url: Option<String>,
  #[serde(default)]
  pub draft: bool,
  #[serde(default)]
  pub assets: Vec<Asset>,
}

impl Release {
  /// Existing asset with exactly this file name
  pub fn find_asset(&self, name: &str) -> Option<&Asset> {
    self.assets.iter().find(|asset| asset.name == name)
  }

  /// Upload endpoint with the URI template suffix removed
  pub fn upload_endpoint(&self) -> &str {
    match self.upload_url.find('{') {
      Some(idx) => &self.upload_url[..idx],
      None => &self.upload_url,
    }
  }
}

/// An asset attached to a release
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
  #[serde(default)]
  pub id: u64,
  pub name: String,
  #[serde(default)]
  pub size: u64,
}

/// Body of `POST /repos/{owner}/{repo}/releases`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelease {
  pub tag_name: String,
  pub target_commitish: String,
  pub name: String,
  pub body: String,
  pub draft: bool,
  pub prerelease: bool,
}

/// A file to attach to a release
#[derive(Debug, Clone)]
pub struct AssetUpload {
  pub name: String,
  pub content_type: String,
  pub data: Vec<u8>,
}

impl AssetUpload {
  /// Declared `Content-Length`
  pub fn content_length(&self) -> u64 {
    self.data.len() as u64
  }
}

/// Error body returned by GitHub on non-success statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
  pub message: String,
}
