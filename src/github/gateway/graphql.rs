//! GraphQL query for the issues a pull request will close.
//!
//! `closingIssuesReferences` is the signal behind GitHub's "linked issues"
//! sidebar: it covers both keyword references and manual links made through
//! the UI.

use serde::{Deserialize, Serialize};

use crate::github::error::GateError;
use crate::github::locator::PullRequestLocator;
use crate::github::models::IssueSummary;

const CLOSING_REFERENCES_QUERY: &str = r"
query ClosingReferences($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    pullRequest(number: $number) {
      closingIssuesReferences(first: 10, userLinkedOnly: false) {
        edges {
          node {
            number
            title
            url
            assignees(first: 10) {
              edges { node { login } }
            }
          }
        }
      }
    }
  }
}
";

#[derive(Debug, Serialize)]
pub(super) struct ClosingReferencesRequest<'a> {
    query: &'static str,
    variables: ClosingReferencesVariables<'a>,
}

#[derive(Debug, Serialize)]
struct ClosingReferencesVariables<'a> {
    owner: &'a str,
    repo: &'a str,
    number: u64,
}

impl<'a> ClosingReferencesRequest<'a> {
    pub(super) fn for_pull_request(locator: &'a PullRequestLocator) -> Self {
        Self {
            query: CLOSING_REFERENCES_QUERY,
            variables: ClosingReferencesVariables {
                owner: locator.repository().owner().as_str(),
                repo: locator.repository().repository().as_str(),
                number: locator.number().get(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ClosingReferencesData {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    pull_request: Option<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestNode {
    closing_issues_references: Connection<IssueNode>,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    #[serde(default = "Vec::new")]
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: Option<T>,
}

#[derive(Debug, Deserialize)]
struct IssueNode {
    number: u64,
    title: Option<String>,
    url: Option<String>,
    assignees: Option<Connection<UserNode>>,
}

#[derive(Debug, Deserialize)]
struct UserNode {
    login: String,
}

impl From<IssueNode> for IssueSummary {
    fn from(value: IssueNode) -> Self {
        Self {
            number: value.number,
            title: value.title,
            url: value.url,
            assignees: value
                .assignees
                .map(|connection| {
                    connection
                        .edges
                        .into_iter()
                        .filter_map(|edge| edge.node)
                        .map(|user| user.login)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

impl GraphQlResponse<ClosingReferencesData> {
    /// Extracts the closing references, treating GraphQL-level errors as a
    /// failed lookup rather than an empty result.
    pub(super) fn into_summaries(self) -> Result<Vec<IssueSummary>, GateError> {
        if !self.errors.is_empty() {
            let messages: Vec<String> = self.errors.into_iter().map(|error| error.message).collect();
            return Err(GateError::Api {
                message: format!("closing references query failed: {}", messages.join("; ")),
            });
        }

        let pull_request = self
            .data
            .and_then(|data| data.repository)
            .and_then(|repository| repository.pull_request)
            .ok_or_else(|| GateError::Api {
                message: "closing references query returned no pull request".to_owned(),
            })?;

        Ok(pull_request
            .closing_issues_references
            .edges
            .into_iter()
            .filter_map(|edge| edge.node)
            .map(IssueSummary::from)
            .collect())
    }
}
