//! Data models for the pull request under validation and its linked issues.

use std::collections::BTreeSet;

use serde::Deserialize;

use super::locator::PullRequestLocator;

/// Author of a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// GitHub login.
    pub login: String,
    /// Whether GitHub flags the account as a bot.
    pub is_bot: bool,
}

/// Read-only view of the pull request being validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContext {
    /// Base repository and number.
    pub locator: PullRequestLocator,
    /// Pull request author.
    pub author: Author,
    /// Description text; empty when the pull request has no body.
    pub body: String,
    /// Name of the branch the pull request targets.
    pub base_branch: String,
}

/// An issue together with the logins assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Issue number.
    pub number: u64,
    /// Assignee logins.
    pub assignees: BTreeSet<String>,
}

impl Issue {
    /// Returns true when nobody is assigned.
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.assignees.is_empty()
    }

    /// Returns true when `login` is among the assignees.
    #[must_use]
    pub fn is_assigned_to(&self, login: &str) -> bool {
        self.assignees.contains(login)
    }
}

/// Issue summary returned by the closing references query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSummary {
    /// Issue number.
    pub number: u64,
    /// Issue title.
    pub title: Option<String>,
    /// HTML URL of the issue.
    pub url: Option<String>,
    /// Assignee logins.
    pub assignees: BTreeSet<String>,
}

impl From<IssueSummary> for Issue {
    fn from(value: IssueSummary) -> Self {
        Self {
            number: value.number,
            assignees: value.assignees,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiIssue {
    pub(super) number: u64,
    #[serde(default)]
    pub(super) assignees: Vec<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommit {
    pub(super) commit: ApiCommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommitDetail {
    pub(super) message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiRepository {
    pub(super) default_branch: Option<String>,
}

impl From<ApiIssue> for Issue {
    fn from(value: ApiIssue) -> Self {
        Self {
            number: value.number,
            assignees: value
                .assignees
                .into_iter()
                .filter_map(|user| user.login)
                .collect(),
        }
    }
}

impl From<ApiCommit> for String {
    fn from(value: ApiCommit) -> Self {
        value.commit.message.unwrap_or_default()
    }
}
