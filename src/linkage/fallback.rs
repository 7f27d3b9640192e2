//! Description-only reference fallback.

use super::keywords::{IssueReference, first_issue_reference};
use crate::github::error::GateError;
use crate::github::gateway::PullRequestGateway;
use crate::github::models::{Issue, PullRequestContext};

/// Result of the description reference check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceOutcome {
    /// The description holds no closing-keyword reference.
    Unreferenced,
    /// The description references an issue.
    Referenced {
        /// The parsed reference.
        reference: IssueReference,
        /// The referenced issue; `None` for references into another
        /// repository.
        issue: Option<Issue>,
    },
    /// The description references an issue in the base repository, but the
    /// issue could not be fetched.
    LookupFailed {
        /// The parsed reference.
        reference: IssueReference,
        /// The lookup failure.
        error: GateError,
    },
}

/// Looks for a closing-keyword reference in the pull request description.
///
/// References into the base repository are fetched so the assignee rule can
/// run on them; a failed fetch is reported as a lookup failure. References
/// into other repositories are accepted as text alone.
pub struct DescriptionReferenceCheck<'a> {
    gateway: &'a dyn PullRequestGateway,
}

impl<'a> DescriptionReferenceCheck<'a> {
    /// Creates the check.
    #[must_use]
    pub const fn new(gateway: &'a dyn PullRequestGateway) -> Self {
        Self { gateway }
    }

    /// Runs the check against the description of `pull_request`.
    pub async fn check(&self, pull_request: &PullRequestContext) -> ReferenceOutcome {
        let Some(reference) = first_issue_reference(&pull_request.body) else {
            tracing::info!(
                pull_request = %pull_request.locator,
                "no issue reference in description"
            );
            return ReferenceOutcome::Unreferenced;
        };
        tracing::info!(
            pull_request = %pull_request.locator,
            issue = reference.number,
            repository = reference.repository.as_deref().unwrap_or("(same)"),
            "found issue reference in description"
        );

        let repository = pull_request.locator.repository();
        if !reference.points_into(repository) {
            return ReferenceOutcome::Referenced {
                reference,
                issue: None,
            };
        }

        match self.gateway.issue(repository, reference.number).await {
            Ok(issue) => ReferenceOutcome::Referenced {
                reference,
                issue: Some(issue),
            },
            Err(error) => {
                tracing::error!(
                    pull_request = %pull_request.locator,
                    issue = reference.number,
                    %error,
                    "referenced issue lookup failed"
                );
                ReferenceOutcome::LookupFailed { reference, error }
            }
        }
    }
}
