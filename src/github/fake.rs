//! In-memory `ReleaseApi` recording every call, for pipeline tests

use super::client::ReleaseApi;
use super::types::{Asset, AssetUpload, NewRelease, Release};
use crate::core::error::{PublishResult, RemoteError};
use crate::release::repository::RepositorySlug;
use std::cell::RefCell;

/// Recorded upload
#[derive(Debug, Clone)]
pub struct RecordedUpload {
  pub release_id: u64,
  pub name: String,
  pub content_type: String,
  pub content_length: u64,
}

#[derive(Default)]
pub struct FakeGithub {
  pub releases: RefCell<Vec<Release>>,
  pub created: RefCell<Vec<NewRelease>>,
  pub uploads: RefCell<Vec<RecordedUpload>>,
  pub list_calls: RefCell<usize>,
  /// Upload of this asset name fails with a 500
  pub fail_upload_of: Option<String>,
}

impl FakeGithub {
  pub fn with_releases(releases: Vec<Release>) -> Self {
    Self {
      releases: RefCell::new(releases),
      ..Self::default()
    }
  }

  pub fn uploaded_names(&self) -> Vec<String> {
    self.uploads.borrow().iter().map(|u| u.name.clone()).collect()
  }

  pub fn network_calls(&self) -> usize {
    *self.list_calls.borrow() + self.created.borrow().len() + self.uploads.borrow().len()
  }
}

/// Release fixture with the given tag and existing asset names
pub fn release(id: u64, tag: &str, assets: &[&str]) -> Release {
  Release {
    id,
    tag_name: tag.to_string(),
    upload_url: format!(
      "https://uploads.github.com/repos/acme/widget/releases/{}/assets{{?name,label}}",
      id
    ),
    html_url: None,
    draft: false,
    assets: assets
      .iter()
      .enumerate()
      .map(|(i, name)| Asset {
        id: i as u64 + 1,
        name: name.to_string(),
        size: 0,
      })
      .collect(),
  }
}

impl ReleaseApi for FakeGithub {
  fn list_releases(&self, _repository: &RepositorySlug) -> PublishResult<Vec<Release>> {
    *self.list_calls.borrow_mut() += 1;
    Ok(self.releases.borrow().clone())
  }

  fn create_release(&self, _repository: &RepositorySlug, new: &NewRelease) -> PublishResult<Release> {
    self.created.borrow_mut().push(new.clone());
    let id = 100 + self.created.borrow().len() as u64;
    let mut created = release(id, &new.tag_name, &[]);
    created.draft = new.draft;
    self.releases.borrow_mut().push(created.clone());
    Ok(created)
  }

  fn upload_asset(&self, release: &Release, upload: AssetUpload) -> PublishResult<Asset> {
    if self.fail_upload_of.as_deref() == Some(upload.name.as_str()) {
      return Err(
        RemoteError::Status {
          operation: "upload asset".to_string(),
          status: 500,
          message: "Server Error".to_string(),
        }
        .into(),
      );
    }

    self.uploads.borrow_mut().push(RecordedUpload {
      release_id: release.id,
      name: upload.name.clone(),
      content_type: upload.content_type.clone(),
      content_length: upload.content_length(),
    });

    let asset = Asset {
      id: self.uploads.borrow().len() as u64,
      name: upload.name,
      size: upload.data.len() as u64,
    };
    if let Some(stored) = self.releases.borrow_mut().iter_mut().find(|r| r.id == release.id) {
      stored.assets.push(asset.clone());
    }
    Ok(asset)
  }
}
