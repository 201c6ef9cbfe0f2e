//! Core building blocks shared by the publish pipeline
//!
//! - **config**: invocation settings and package.json validation
//! - **context**: validated inputs of one run, built once in the command
//! - **error**: error types with contextual help messages and exit codes

pub mod config;
pub mod context;
pub mod error;
