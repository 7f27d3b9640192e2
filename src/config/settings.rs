//! Resolved, immutable settings for one validation run.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::github::error::GateError;
use crate::github::locator::PersonalAccessToken;

const DEFAULT_NO_ISSUE_MESSAGE: &str = "This PR must be linked to an issue before it can be merged.";
const DEFAULT_NO_ASSIGNEE_MESSAGE: &str =
    "The linked issue must be assigned to the PR author before this PR can be merged.";
const DEFAULT_INVALID_BRANCH_MESSAGE: &str =
    "This PR must target one of the allowed branches: {{ allowed_branches }}.";
const DEFAULT_FALLBACK_MESSAGE: &str = "PR validation failed: {{ description }}";

/// Comment templates keyed by failure kind.
///
/// Templates use Jinja2 syntax; see [`crate::outcome::MessageCatalogue`] for
/// the variables available to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplates {
    /// Used when no issue is linked or referenced.
    pub no_issue: String,
    /// Used when the issue has no assignee or is assigned to someone else.
    pub no_assignee: String,
    /// Used when the target branch is not allowed.
    pub invalid_branch: String,
    /// Used for every other failure.
    pub fallback: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            no_issue: DEFAULT_NO_ISSUE_MESSAGE.to_owned(),
            no_assignee: DEFAULT_NO_ASSIGNEE_MESSAGE.to_owned(),
            invalid_branch: DEFAULT_INVALID_BRANCH_MESSAGE.to_owned(),
            fallback: DEFAULT_FALLBACK_MESSAGE.to_owned(),
        }
    }
}

/// A way of finding the issue a pull request is linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStrategyKind {
    /// Ask GitHub for the issues merging the pull request will close.
    ClosingReferences,
    /// Scan the description and commit messages for closing keywords.
    KeywordScan,
}

impl LinkStrategyKind {
    /// Returns the configuration name of the strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClosingReferences => "closing-references",
            Self::KeywordScan => "keyword-scan",
        }
    }

    /// Parses a comma- or newline-separated list, dropping duplicates while
    /// keeping the first occurrence's position.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Configuration`] for an unknown strategy name.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, GateError> {
        let mut kinds = Vec::new();
        for name in parse_list(raw, &['\n', ',']) {
            let kind = name.parse::<Self>()?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Ok(kinds)
    }
}

impl FromStr for LinkStrategyKind {
    type Err = GateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "closing-references" => Ok(Self::ClosingReferences),
            "keyword-scan" => Ok(Self::KeywordScan),
            other => Err(GateError::Configuration {
                message: format!(
                    "unknown link strategy '{other}' (expected closing-references or keyword-scan)"
                ),
            }),
        }
    }
}

impl fmt::Display for LinkStrategyKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Settings resolved once per run and shared read-only by every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateSettings {
    /// API token.
    pub token: PersonalAccessToken,
    /// Logins exempt from validation.
    pub skip_users: BTreeSet<String>,
    /// Whether the linked issue must be assigned to the author.
    pub require_assignee: bool,
    /// Whether failing pull requests are closed.
    pub close_on_failure: bool,
    /// Whether the description-reference fallback is consulted.
    pub check_issue_reference: bool,
    /// Allowed target branches; empty means unrestricted.
    pub target_branches: Vec<String>,
    /// Failure comment templates.
    pub messages: MessageTemplates,
    /// Linkage strategies in the order they are tried.
    pub link_strategies: Vec<LinkStrategyKind>,
}

impl GateSettings {
    /// Creates settings with the action's defaults: no exemptions, no branch
    /// restriction, assignee not required, close on failure, no fallback, and
    /// closing references as the only linkage strategy.
    #[must_use]
    pub fn new(token: PersonalAccessToken) -> Self {
        Self {
            token,
            skip_users: BTreeSet::new(),
            require_assignee: false,
            close_on_failure: true,
            check_issue_reference: false,
            target_branches: Vec::new(),
            messages: MessageTemplates::default(),
            link_strategies: vec![LinkStrategyKind::ClosingReferences],
        }
    }

    /// Returns true when `login` is in the skip list.
    #[must_use]
    pub fn is_skipped(&self, login: &str) -> bool {
        self.skip_users.contains(login)
    }
}

/// Interprets action boolean text: `true`, `1`, `yes`, and `on` (any case)
/// are true; everything else is false.
#[must_use]
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Splits `raw` on any of `separators`, trimming entries and dropping blanks.
#[must_use]
pub fn parse_list(raw: &str, separators: &[char]) -> Vec<String> {
    raw.split(separators)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
