//! Octocrab implementation of the pull request gateway.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};
use serde::Serialize;
use serde::de::IgnoredAny;
use url::Url;

use crate::github::error::GateError;
use crate::github::locator::{PersonalAccessToken, PullRequestLocator, RepositoryLocator};
use crate::github::models::{ApiCommit, ApiIssue, ApiRepository, Issue, IssueSummary};

use super::PullRequestGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;
use super::graphql::{ClosingReferencesData, ClosingReferencesRequest, GraphQlResponse};

const COMMITS_PER_PAGE: u8 = 100;

#[derive(Debug, Serialize)]
struct PageParameters {
    per_page: u8,
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct StateUpdate {
    state: &'static str,
}

/// Octocrab-backed gateway.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and API base URL.
    ///
    /// # Errors
    ///
    /// Returns `GateError::InvalidUrl` when the base URI cannot be parsed or
    /// `GateError::Api` when Octocrab fails to construct a client.
    pub fn for_token(token: &PersonalAccessToken, api_base: &Url) -> Result<Self, GateError> {
        let octocrab = build_octocrab_client(token, api_base)?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn closing_references(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<IssueSummary>, GateError> {
        let request = ClosingReferencesRequest::for_pull_request(locator);
        let response: GraphQlResponse<ClosingReferencesData> = self
            .client
            .graphql(&request)
            .await
            .map_err(|error| map_octocrab_error("closing references", &error))?;
        response.into_summaries()
    }

    async fn issue(
        &self,
        repository: &RepositoryLocator,
        issue_number: u64,
    ) -> Result<Issue, GateError> {
        self.client
            .get::<ApiIssue, _, _>(repository.issue_path(issue_number), None::<&()>)
            .await
            .map(Issue::from)
            .map_err(|error| map_octocrab_error("issue", &error))
    }

    async fn commit_messages(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<String>, GateError> {
        let parameters = PageParameters {
            per_page: COMMITS_PER_PAGE,
        };
        let page = self
            .client
            .get::<Page<ApiCommit>, _, _>(locator.commits_path(), Some(&parameters))
            .await
            .map_err(|error| map_octocrab_error("pull request commits", &error))?;

        self.client
            .all_pages(page)
            .await
            .map(|commits| commits.into_iter().map(String::from).collect())
            .map_err(|error| map_octocrab_error("pull request commits", &error))
    }

    async fn default_branch(&self, repository: &RepositoryLocator) -> Result<String, GateError> {
        let api = self
            .client
            .get::<ApiRepository, _, _>(repository.repository_path(), None::<&()>)
            .await
            .map_err(|error| map_octocrab_error("repository", &error))?;

        api.default_branch.ok_or_else(|| GateError::Api {
            message: format!("repository {repository} reported no default branch"),
        })
    }

    async fn post_comment(&self, locator: &PullRequestLocator, body: &str) -> Result<(), GateError> {
        self.client
            .post(locator.comments_path(), Some(&CommentRequest { body }))
            .await
            .map(|_: IgnoredAny| ())
            .map_err(|error| map_octocrab_error("post comment", &error))
    }

    async fn close_pull_request(&self, locator: &PullRequestLocator) -> Result<(), GateError> {
        self.client
            .patch(
                locator.pull_request_path(),
                Some(&StateUpdate { state: "closed" }),
            )
            .await
            .map(|_: IgnoredAny| ())
            .map_err(|error| map_octocrab_error("close pull request", &error))
    }
}
