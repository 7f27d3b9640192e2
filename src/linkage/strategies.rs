//! Linkage strategies backed by the GitHub gateway.

use async_trait::async_trait;

use super::keywords::closing_issue_numbers;
use super::{IssueLinkStrategy, LinkOutcome};
use crate::github::gateway::PullRequestGateway;
use crate::github::models::{Issue, PullRequestContext};

/// Asks GitHub for the issues the pull request will close when merged.
///
/// The first closing reference is primary; its assignees arrive with the
/// query so no further lookup is needed.
pub struct ClosingReferenceStrategy<'a> {
    gateway: &'a dyn PullRequestGateway,
}

impl<'a> ClosingReferenceStrategy<'a> {
    /// Creates the strategy.
    #[must_use]
    pub const fn new(gateway: &'a dyn PullRequestGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl IssueLinkStrategy for ClosingReferenceStrategy<'_> {
    fn name(&self) -> &'static str {
        "closing-references"
    }

    async fn resolve(&self, pull_request: &PullRequestContext) -> LinkOutcome {
        match self.gateway.closing_references(&pull_request.locator).await {
            Ok(summaries) => match summaries.into_iter().next() {
                Some(primary) => {
                    tracing::info!(
                        pull_request = %pull_request.locator,
                        issue = primary.number,
                        "found closing reference"
                    );
                    LinkOutcome::Linked(Issue::from(primary))
                }
                None => LinkOutcome::NotLinked,
            },
            Err(error) => {
                tracing::error!(
                    pull_request = %pull_request.locator,
                    %error,
                    "closing references lookup failed"
                );
                LinkOutcome::LookupError(error)
            }
        }
    }
}

/// Scans the description and every commit message for closing keywords and
/// resolves the first referenced issue in the base repository.
pub struct KeywordScanStrategy<'a> {
    gateway: &'a dyn PullRequestGateway,
}

impl<'a> KeywordScanStrategy<'a> {
    /// Creates the strategy.
    #[must_use]
    pub const fn new(gateway: &'a dyn PullRequestGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl IssueLinkStrategy for KeywordScanStrategy<'_> {
    fn name(&self) -> &'static str {
        "keyword-scan"
    }

    async fn resolve(&self, pull_request: &PullRequestContext) -> LinkOutcome {
        let commit_messages = match self.gateway.commit_messages(&pull_request.locator).await {
            Ok(messages) => messages,
            Err(error) => {
                tracing::error!(
                    pull_request = %pull_request.locator,
                    %error,
                    "commit listing failed"
                );
                return LinkOutcome::LookupError(error);
            }
        };

        let texts = std::iter::once(pull_request.body.as_str())
            .chain(commit_messages.iter().map(String::as_str));
        let numbers = closing_issue_numbers(texts);
        let Some(&first) = numbers.first() else {
            return LinkOutcome::NotLinked;
        };
        tracing::debug!(
            pull_request = %pull_request.locator,
            candidates = ?numbers,
            "closing keywords found"
        );

        match self
            .gateway
            .issue(pull_request.locator.repository(), first)
            .await
        {
            Ok(issue) => LinkOutcome::Linked(issue),
            Err(error) => {
                tracing::error!(
                    pull_request = %pull_request.locator,
                    issue = first,
                    %error,
                    "issue lookup failed"
                );
                LinkOutcome::LookupError(error)
            }
        }
    }
}
