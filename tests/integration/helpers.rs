//! Test helpers for integration tests

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const TOKEN: &str = "test-token";

/// A package directory with package.json and build/stage
pub struct TestPackage {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestPackage {
  /// Create the `acme/widget` 1.2.0 package with `remote_path = "v{version}"`
  pub fn widget() -> Result<Self> {
    Self::with_manifest(widget_manifest())
  }

  /// Create a package with the given package.json contents
  pub fn with_manifest(manifest: Value) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    std::fs::write(path.join("package.json"), serde_json::to_string_pretty(&manifest)?)?;
    Ok(Self { _root: root, path })
  }

  /// Stage files for a tag under build/stage/<tag>
  pub fn stage(&self, tag: &str, files: &[(&str, &[u8])]) -> Result<PathBuf> {
    let dir = self.path.join("build").join("stage").join(tag);
    std::fs::create_dir_all(&dir)?;
    for (name, content) in files {
      std::fs::write(dir.join(name), content)?;
    }
    Ok(dir)
  }
}

/// package.json of the widget scenario
pub fn widget_manifest() -> Value {
  json!({
    "name": "widget",
    "version": "1.2.0",
    "repository": { "type": "git", "url": "https://github.com/acme/widget.git" },
    "binary": {
      "module_name": "widget",
      "module_path": "./lib/binding/",
      "host": "https://github.com/acme/widget/releases/download/",
      "remote_path": "v{version}"
    }
  })
}

/// Release payload as GitHub returns it, with uploads routed to `server_url`
pub fn release_json(server_url: &str, id: u64, tag: &str, draft: bool, assets: &[&str]) -> Value {
  let assets: Vec<Value> = assets
    .iter()
    .enumerate()
    .map(|(i, name)| json!({ "id": i + 1, "name": name, "size": 1, "state": "uploaded" }))
    .collect();

  json!({
    "id": id,
    "tag_name": tag,
    "name": tag,
    "draft": draft,
    "prerelease": false,
    "html_url": format!("https://github.com/acme/widget/releases/tag/{}", tag),
    "upload_url": format!("{}/uploads/acme/widget/releases/{}/assets{{?name,label}}", server_url, id),
    "assets": assets,
  })
}

/// Run prebuild-publish in `cwd` with a clean environment.
///
/// `api_url` and `token` are passed through the tool's environment
/// variables; `None` leaves the variable unset.
pub fn run_publisher(cwd: &Path, api_url: Option<&str>, token: Option<&str>, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_prebuild-publish");

  let mut command = Command::new(bin);
  command
    .current_dir(cwd)
    .args(args)
    .env_remove("NODE_PRE_GYP_GITHUB_TOKEN")
    .env_remove("NODE_PRE_GYP_GITHUB_API_URL")
    .env_remove("RUST_LOG");
  if let Some(url) = api_url {
    command.env("NODE_PRE_GYP_GITHUB_API_URL", url);
  }
  if let Some(token) = token {
    command.env("NODE_PRE_GYP_GITHUB_TOKEN", token);
  }

  command.output().context("Failed to run prebuild-publish")
}

/// Fail with both output streams when the run did not succeed
pub fn assert_success(output: &Output) {
  assert!(
    output.status.success(),
    "prebuild-publish failed ({:?})\nstdout: {}\nstderr: {}",
    output.status.code(),
    stdout(output),
    stderr(output)
  );
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
