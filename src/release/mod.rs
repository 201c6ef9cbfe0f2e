//! Release resolution and asset synchronization
//!
//! # Pipeline
//!
//! 1. **repository**: `repository.url` → host, owner, repo
//! 2. **resolver**: find the release for the computed tag, or create it
//! 3. **assets**: list `build/stage/<tag>/` and upload what the release lacks
//!
//! The tag is `binary.remote_path` with `{version}` substituted:
//!
//! ```json
//! "binary": {
//!   "host": "https://github.com/acme/widget/releases/download/",
//!   "remote_path": "v{version}"
//! }
//! ```

pub mod assets;
pub mod repository;
pub mod resolver;

pub use assets::{SyncReport, list_staged_files, sync_assets};
pub use resolver::{Resolution, resolve_release};
