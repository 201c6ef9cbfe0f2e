//! Staged binaries and their upload to a release
//!
//! Files already attached to the release are skipped, never replaced.
//! Uploads run one at a time in file-name order; the first failure aborts
//! the rest and leaves earlier uploads in place.

use crate::core::error::{PublishResult, StagingError};
use crate::github::{AssetUpload, Release, ReleaseApi};
use crate::ui::progress::UploadProgress;
use crate::utils::content_type_for;
use std::fs;
use std::path::{Path, PathBuf};

/// A file waiting in `build/stage/<tag>/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
  pub name: String,
  pub path: PathBuf,
}

/// Outcome of one synchronization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
  pub uploaded: Vec<String>,
  pub skipped: Vec<String>,
}

/// List the regular files in the stage directory, sorted by name.
///
/// A missing directory or one without files is an error: publishing a
/// version with nothing staged means the build step did not run.
pub fn list_staged_files(stage_dir: &Path) -> PublishResult<Vec<StagedFile>> {
  let unreadable = |e: std::io::Error| StagingError::DirectoryUnreadable {
    path: stage_dir.to_path_buf(),
    reason: e.to_string(),
  };

  let mut files = Vec::new();
  for entry in fs::read_dir(stage_dir).map_err(unreadable)? {
    let entry = entry.map_err(unreadable)?;
    let path = entry.path();
    if !path.is_file() {
      log::debug!("Ignoring {} (not a regular file)", path.display());
      continue;
    }
    let name = entry
      .file_name()
      .into_string()
      .map_err(|_| StagingError::InvalidFileName { path: path.clone() })?;
    files.push(StagedFile { name, path });
  }

  if files.is_empty() {
    return Err(
      StagingError::Empty {
        path: stage_dir.to_path_buf(),
      }
      .into(),
    );
  }

  files.sort_by(|a, b| a.name.cmp(&b.name));
  Ok(files)
}

/// Upload every staged file that the release does not already have
pub fn sync_assets<A: ReleaseApi + ?Sized>(
  api: &A,
  release: &Release,
  files: &[StagedFile],
  mut progress: Option<&mut UploadProgress>,
) -> PublishResult<SyncReport> {
  let mut report = SyncReport::default();

  for file in files {
    if release.find_asset(&file.name).is_some() {
      log::info!(
        "Staged file {} found but it already exists in release {}. If you would like to replace it, you must first manually delete it within GitHub.",
        file.name,
        release.tag_name
      );
      report.skipped.push(file.name.clone());
    } else {
      log::info!("Staged file {} found. Proceeding to upload it.", file.name);
      upload_file(api, release, file)?;
      log::info!(
        "Staged file {} saved to release {} successfully.",
        file.name,
        release.tag_name
      );
      report.uploaded.push(file.name.clone());
    }

    if let Some(p) = progress.as_deref_mut() {
      p.inc();
    }
  }

  Ok(report)
}

fn upload_file<A: ReleaseApi + ?Sized>(api: &A, release: &Release, file: &StagedFile) -> PublishResult<()> {
  let data = fs::read(&file.path).map_err(|e| StagingError::FileUnreadable {
    path: file.path.clone(),
    reason: e.to_string(),
  })?;

  let upload = AssetUpload {
    name: file.name.clone(),
    content_type: content_type_for(&file.name),
    data,
  };
  let asset = api.upload_asset(release, upload)?;
  log::debug!("Asset {} stored with id {} ({} bytes)", asset.name, asset.id, asset.size);
  Ok(())
}
