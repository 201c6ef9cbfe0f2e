//! Integration tests for prebuild-publish
//!
//! Each test runs the compiled binary in a temporary package directory,
//! against a mockito server standing in for the GitHub API.

mod helpers;
