//! GitHub release API access
//!
//! - **client**: `ReleaseApi` trait and its blocking HTTPS implementation
//! - **types**: release, asset and request payloads

pub mod client;
pub mod types;

#[cfg(test)]
pub mod fake;

pub use client::{GithubClient, ReleaseApi};
pub use types::{AssetUpload, NewRelease, Release};
