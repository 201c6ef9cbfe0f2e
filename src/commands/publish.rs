//! Publish command implementation
//!
//! Validate configuration → list staged files → resolve the release →
//! upload missing assets. Each step starts only after the previous one
//! succeeded; the first error aborts the run.

use crate::core::config::PublishSettings;
use crate::core::context::PublishContext;
use crate::core::error::PublishResult;
use crate::github::{GithubClient, Release, ReleaseApi};
use crate::release::{Resolution, SyncReport, list_staged_files, resolve_release, sync_assets};
use crate::ui::progress::UploadProgress;

/// Result of a successful publish
#[derive(Debug)]
pub struct PublishOutcome {
  pub release: Release,
  pub resolution: Resolution,
  pub report: SyncReport,
}

/// Run the publish command against GitHub
pub fn run_publish(settings: PublishSettings) -> PublishResult<()> {
  let ctx = PublishContext::build(settings)?;
  let client = GithubClient::new(&ctx.api_base_url, &ctx.token)?;

  let outcome = publish(&ctx, &client)?;

  print_summary(&ctx, &outcome);
  println!("Done");
  Ok(())
}

/// Publish the staged files of `ctx` through `api`.
///
/// The stage directory is listed before any request is made, so an empty
/// stage never creates a release.
pub fn publish<A: ReleaseApi + ?Sized>(ctx: &PublishContext, api: &A) -> PublishResult<PublishOutcome> {
  let files = list_staged_files(&ctx.stage_dir)?;
  log::debug!("{} file(s) staged in {}", files.len(), ctx.stage_dir.display());

  let (release, resolution) = resolve_release(api, &ctx.target, ctx.draft)?;

  let mut progress =
    (!ctx.verbose).then(|| UploadProgress::new(files.len(), format!("Publishing {}", release.tag_name)));
  let report = sync_assets(api, &release, &files, progress.as_mut())?;

  Ok(PublishOutcome {
    release,
    resolution,
    report,
  })
}

fn print_summary(ctx: &PublishContext, outcome: &PublishOutcome) {
  let how = match outcome.resolution {
    Resolution::Created if outcome.release.draft => "created as draft",
    Resolution::Created => "created",
    Resolution::Existing | Resolution::ExistingByVersion => "existing",
  };

  println!(
    "📦 {} release {} ({})",
    ctx.target.repository, outcome.release.tag_name, how
  );
  println!(
    "   Uploaded: {} file(s), already present: {} file(s)",
    outcome.report.uploaded.len(),
    outcome.report.skipped.len()
  );
  if let Some(url) = &outcome.release.html_url {
    println!("   {}", url);
  }
}
