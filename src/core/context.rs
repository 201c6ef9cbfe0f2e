//! Publish context - validate once, pass everywhere
//!
//! `PublishContext::build` performs every configuration check in order
//! (token first, then package.json) and derives the paths and URLs the
//! pipeline needs. Nothing after it reads the environment.

use crate::core::config::{Manifest, PublishSettings, PublishTarget};
use crate::core::error::PublishResult;
use std::path::PathBuf;

/// Validated inputs of one publish run
#[derive(Debug, Clone)]
pub struct PublishContext {
  /// GitHub token
  pub token: String,

  /// Create new releases as drafts
  pub draft: bool,

  /// Per-file logging enabled
  pub verbose: bool,

  /// What to publish and where
  pub target: PublishTarget,

  /// `build/stage/<tag>` under the root
  pub stage_dir: PathBuf,

  /// REST API root for the repository host
  pub api_base_url: String,
}

impl PublishContext {
  /// Validate settings and package.json.
  ///
  /// The token check comes first so a missing token fails before any file
  /// is read.
  pub fn build(settings: PublishSettings) -> PublishResult<Self> {
    let token = settings.require_token()?.to_string();
    let manifest = Manifest::load(&settings.root)?;
    let target = manifest.validate()?;

    let stage_dir = target.stage_dir(&settings.root);
    let api_base_url = settings
      .api_url
      .clone()
      .unwrap_or_else(|| target.repository.api_base_url());

    log::debug!(
      "Publishing {} {} to {} (tag {})",
      target.package_name,
      target.version,
      target.repository,
      target.tag_name
    );

    Ok(Self {
      token,
      draft: settings.draft,
      verbose: settings.verbose,
      target,
      stage_dir,
      api_base_url,
    })
  }
}
