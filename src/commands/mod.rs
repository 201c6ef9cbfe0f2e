//! CLI commands for prebuild-publish
//!
//! - **publish**: upload the contents of `build/stage/<tag>` to the matching GitHub release

pub mod publish;

pub use publish::run_publish;
