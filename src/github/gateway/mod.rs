//! Gateway to the GitHub API used by the validation gate.
//!
//! The trait-based design lets the rule pipeline and the outcome handler run
//! against mocks in tests while the Octocrab implementation handles real HTTP
//! requests.

mod client;
mod error_mapping;
mod graphql;
mod pull_request;

pub use pull_request::OctocrabGateway;

use async_trait::async_trait;

use crate::github::error::GateError;
use crate::github::locator::{PullRequestLocator, RepositoryLocator};
use crate::github::models::{Issue, IssueSummary};

/// Operations the gate needs from the hosting platform.
///
/// Every call is a single request/response exchange. Implementations do not
/// retry; failures surface immediately as [`GateError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// Issues that merging the pull request will close, in GitHub's order.
    async fn closing_references(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<IssueSummary>, GateError>;

    /// Fetch an issue and its assignees by number.
    async fn issue(
        &self,
        repository: &RepositoryLocator,
        issue_number: u64,
    ) -> Result<Issue, GateError>;

    /// Messages of every commit on the pull request.
    async fn commit_messages(&self, locator: &PullRequestLocator)
    -> Result<Vec<String>, GateError>;

    /// Default branch of the repository.
    async fn default_branch(&self, repository: &RepositoryLocator) -> Result<String, GateError>;

    /// Post an issue comment on the pull request.
    async fn post_comment(&self, locator: &PullRequestLocator, body: &str)
    -> Result<(), GateError>;

    /// Transition the pull request to the closed state.
    async fn close_pull_request(&self, locator: &PullRequestLocator) -> Result<(), GateError>;
}
