//! GitHub access for the validation gate.
//!
//! This module parses the Actions event payload into a pull request context
//! and wraps Octocrab behind the [`PullRequestGateway`] trait. Errors are
//! mapped into [`GateError`] variants so callers can tell setup failures,
//! lookup failures, and rejected credentials apart without seeing Octocrab
//! internals.

pub mod error;
pub mod event;
pub mod gateway;
pub mod locator;
pub mod models;

pub use error::GateError;
pub use event::{load_event, parse_event};
pub use gateway::{OctocrabGateway, PullRequestGateway};
pub use locator::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryLocator, RepositoryName,
    RepositoryOwner,
};
pub use models::{Author, Issue, IssueSummary, PullRequestContext};

#[cfg(test)]
pub use gateway::MockPullRequestGateway;
