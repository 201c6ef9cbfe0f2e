//! Find the GitHub release for the computed tag, creating it when absent

use crate::core::config::PublishTarget;
use crate::core::error::PublishResult;
use crate::github::{NewRelease, Release, ReleaseApi};

/// Branch new release tags point at
pub const TARGET_COMMITISH: &str = "master";

/// How the release was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
  /// Tag matched the computed tag
  Existing,
  /// Tag matched the raw version (created by an earlier run)
  ExistingByVersion,
  /// Created during this run
  Created,
}

/// First release whose tag equals `tag` exactly
pub fn find_release<'a>(releases: &'a [Release], tag: &str) -> Option<&'a Release> {
  releases.iter().find(|release| release.tag_name == tag)
}

/// Request body for the release created when none matches.
///
/// The tag is the raw package version, not the computed tag.
pub fn new_release(target: &PublishTarget, draft: bool) -> NewRelease {
  NewRelease {
    tag_name: target.version.clone(),
    target_commitish: TARGET_COMMITISH.to_string(),
    name: format!("v{}", target.version),
    body: format!("{} {}", target.package_name, target.version).trim().to_string(),
    draft,
    prerelease: false,
  }
}

/// Return the release for `target.tag_name`, creating one if none exists.
///
/// All releases are listed (every page) so an older release is still found.
/// When the computed tag differs from the version, a release tagged with the
/// bare version is accepted too, since that is the tag this function creates.
pub fn resolve_release<A: ReleaseApi + ?Sized>(
  api: &A,
  target: &PublishTarget,
  draft: bool,
) -> PublishResult<(Release, Resolution)> {
  let releases = api.list_releases(&target.repository)?;

  if let Some(release) = find_release(&releases, &target.tag_name) {
    log::debug!("Using existing release {} (id {})", release.tag_name, release.id);
    return Ok((release.clone(), Resolution::Existing));
  }

  if target.tag_name != target.version
    && let Some(release) = find_release(&releases, &target.version)
  {
    log::warn!(
      "No release tagged {} in {}; using release {} created for version {}",
      target.tag_name,
      target.repository,
      release.tag_name,
      target.version
    );
    return Ok((release.clone(), Resolution::ExistingByVersion));
  }

  let request = new_release(target, draft);
  if request.tag_name != target.tag_name {
    log::warn!(
      "Creating release with tag {} although binary.remote_path resolves to {}",
      request.tag_name,
      target.tag_name
    );
  }

  let release = api.create_release(&target.repository, &request)?;
  log::info!(
    "Created {}release {} in {}",
    if release.draft { "draft " } else { "" },
    release.tag_name,
    target.repository
  );
  Ok((release, Resolution::Created))
}
