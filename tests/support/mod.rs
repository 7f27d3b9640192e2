//! Shared test utilities.

pub mod api_harness;
pub mod github_api;
