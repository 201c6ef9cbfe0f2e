//! Blocking GitHub REST client for the three release endpoints the publisher uses

use super::types::{ApiErrorBody, Asset, AssetUpload, NewRelease, Release};
use crate::core::error::{PublishError, PublishResult, RemoteError};
use crate::release::repository::RepositorySlug;
use reqwest::blocking::{Client, Response};
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;

/// User agent sent with every request (GitHub rejects requests without one)
pub const USER_AGENT: &str = concat!("prebuild-publish/", env!("CARGO_PKG_VERSION"));

/// REST API version pinned via `X-GitHub-Api-Version`
pub const API_VERSION: &str = "2022-11-28";

/// Page size for release listing (GitHub's maximum)
pub const PER_PAGE: u32 = 100;

/// Release operations consumed by the publish pipeline
pub trait ReleaseApi {
  /// Every release of the repository, across all pages
  fn list_releases(&self, repository: &RepositorySlug) -> PublishResult<Vec<Release>>;

  /// Create a release and return it
  fn create_release(&self, repository: &RepositorySlug, release: &NewRelease) -> PublishResult<Release>;

  /// Attach a file to `release`
  fn upload_asset(&self, release: &Release, upload: AssetUpload) -> PublishResult<Asset>;
}

/// `ReleaseApi` over HTTPS
pub struct GithubClient {
  http: Client,
  api_base: String,
}

impl GithubClient {
  /// Build an authenticated client rooted at `api_base` (e.g. `https://api.github.com`).
  ///
  /// No request timeout is set: upload duration is bounded by GitHub and the
  /// transport only.
  pub fn new(api_base: &str, token: &str) -> PublishResult<Self> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
      PublishError::with_help(
        "GitHub token contains characters that are not valid in an HTTP header",
        "Check NODE_PRE_GYP_GITHUB_TOKEN for stray whitespace or quotes.",
      )
    })?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, auth);
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
    headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

    let http = Client::builder()
      .user_agent(USER_AGENT)
      .default_headers(headers)
      .timeout(None::<Duration>)
      .build()
      .map_err(|e| RemoteError::transport("build HTTP client", e))?;

    Ok(Self {
      http,
      api_base: api_base.trim_end_matches('/').to_string(),
    })
  }

  fn releases_url(&self, repository: &RepositorySlug) -> String {
    format!(
      "{}/repos/{}/{}/releases",
      self.api_base, repository.owner, repository.repo
    )
  }
}

impl ReleaseApi for GithubClient {
  fn list_releases(&self, repository: &RepositorySlug) -> PublishResult<Vec<Release>> {
    const OPERATION: &str = "list releases";

    let mut url = format!("{}?per_page={}", self.releases_url(repository), PER_PAGE);
    let mut releases = Vec::new();

    loop {
      log::debug!("GET {}", url);
      let response = self
        .http
        .get(&url)
        .send()
        .map_err(|e| RemoteError::transport(OPERATION, e))?;
      let response = check_status(OPERATION, response)?;
      let next = next_page_url(response.headers());

      let page: Vec<Release> = response
        .json()
        .map_err(|e| RemoteError::invalid_response(OPERATION, e))?;
      releases.extend(page);

      match next {
        Some(next) if next != url => url = next,
        _ => break,
      }
    }

    log::debug!("Found {} release(s) in {}", releases.len(), repository);
    Ok(releases)
  }

  fn create_release(&self, repository: &RepositorySlug, release: &NewRelease) -> PublishResult<Release> {
    const OPERATION: &str = "create release";

    let url = self.releases_url(repository);
    log::debug!("POST {} (tag {})", url, release.tag_name);
    let response = self
      .http
      .post(&url)
      .json(release)
      .send()
      .map_err(|e| RemoteError::transport(OPERATION, e))?;

    let created = check_status(OPERATION, response)?
      .json()
      .map_err(|e| RemoteError::invalid_response(OPERATION, e))?;
    Ok(created)
  }

  fn upload_asset(&self, release: &Release, upload: AssetUpload) -> PublishResult<Asset> {
    const OPERATION: &str = "upload asset";

    let endpoint = release.upload_endpoint();
    log::debug!(
      "POST {}?name={} ({} bytes, {})",
      endpoint,
      upload.name,
      upload.content_length(),
      upload.content_type
    );
    let response = self
      .http
      .post(endpoint)
      .query(&[("name", upload.name.as_str())])
      .header(header::CONTENT_TYPE, upload.content_type.as_str())
      .header(header::CONTENT_LENGTH, upload.content_length())
      .body(upload.data)
      .send()
      .map_err(|e| RemoteError::transport(OPERATION, e))?;

    let asset = check_status(OPERATION, response)?
      .json()
      .map_err(|e| RemoteError::invalid_response(OPERATION, e))?;
    Ok(asset)
  }
}

/// Turn a non-success response into `RemoteError::Status`, keeping GitHub's message
fn check_status(operation: &str, response: Response) -> PublishResult<Response> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }

  let body = response.text().unwrap_or_default();
  let message = match serde_json::from_str::<ApiErrorBody>(&body) {
    Ok(parsed) => parsed.message,
    Err(_) if body.trim().is_empty() => status.canonical_reason().unwrap_or("request failed").to_string(),
    Err(_) => body.trim().to_string(),
  };

  Err(
    RemoteError::Status {
      operation: operation.to_string(),
      status: status.as_u16(),
      message,
    }
    .into(),
  )
}

/// `rel="next"` target of an RFC 8288 `Link` header
pub fn next_page_url(headers: &HeaderMap) -> Option<String> {
  let link = headers.get(header::LINK)?.to_str().ok()?;
  parse_next_link(link)
}

fn parse_next_link(link: &str) -> Option<String> {
  link.split(',').find_map(|entry| {
    let mut parts = entry.split(';');
    let target = parts.next()?.trim();
    let is_next = parts.any(|param| {
      let param = param.trim();
      param.eq_ignore_ascii_case("rel=\"next\"") || param.eq_ignore_ascii_case("rel=next")
    });
    if !is_next {
      return None;
    }
    target.strip_prefix('<')?.strip_suffix('>').map(str::to_string)
  })
}
