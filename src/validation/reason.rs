//! Stable reason codes and the validation result.

use std::fmt;
use std::str::FromStr;

use crate::github::models::Issue;

/// Why a pull request passed or failed validation.
///
/// The snake_case [`code`](Self::code) is stable and machine-facing; the
/// human-readable [`description`](Self::description) is only used when
/// rendering comments and log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    /// The author is a bot account.
    ExemptBot,
    /// The author is in the skip list.
    ExemptSkipList,
    /// Every rule passed.
    AllPassed,
    /// The target branch is outside the effective allow-list.
    BranchNotAllowed {
        /// Sorted, deduplicated effective allow-list.
        allowed: Vec<String>,
    },
    /// No linked issue and the description fallback is disabled.
    NotLinked,
    /// No linked issue and the description holds no reference.
    NoIssueNoReference,
    /// A linkage lookup failed.
    LinkageError,
    /// The linked issue has no assignees.
    NoAssignee,
    /// The author is not among the linked issue's assignees.
    AssigneeMismatch,
    /// A reason code this build does not know.
    Unknown(String),
}

impl ValidationReason {
    /// Stable snake_case code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::ExemptBot => "exempt_bot",
            Self::ExemptSkipList => "exempt_skip_list",
            Self::AllPassed => "all_passed",
            Self::BranchNotAllowed { .. } => "branch_not_allowed",
            Self::NotLinked => "not_linked",
            Self::NoIssueNoReference => "no_issue_no_reference",
            Self::LinkageError => "linkage_error",
            Self::NoAssignee => "no_assignee",
            Self::AssigneeMismatch => "assignee_mismatch",
            Self::Unknown(raw) => raw,
        }
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::ExemptBot => String::from("Bot user"),
            Self::ExemptSkipList => String::from("User in skip list"),
            Self::AllPassed => String::from("All validations passed"),
            Self::BranchNotAllowed { allowed } => format!(
                "PR must target one of the allowed branches: {}",
                allowed.join(", ")
            ),
            Self::NotLinked => String::from("No linked issue"),
            Self::NoIssueNoReference => {
                String::from("No linked issue and no issue reference in description")
            }
            Self::LinkageError => String::from("Error checking issue linking"),
            Self::NoAssignee => String::from("Issue has no assignee"),
            Self::AssigneeMismatch => String::from("Assignee mismatch"),
            Self::Unknown(raw) => raw.clone(),
        }
    }

    /// The allow-list carried by [`Self::BranchNotAllowed`]; empty otherwise.
    #[must_use]
    pub fn allowed_branches(&self) -> &[String] {
        match self {
            Self::BranchNotAllowed { allowed } => allowed,
            _ => &[],
        }
    }
}

impl FromStr for ValidationReason {
    type Err = std::convert::Infallible;

    /// Parses a reason code. Unrecognised codes become [`Self::Unknown`];
    /// `branch_not_allowed` parses with an empty allow-list.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "exempt_bot" => Self::ExemptBot,
            "exempt_skip_list" => Self::ExemptSkipList,
            "all_passed" => Self::AllPassed,
            "branch_not_allowed" => Self::BranchNotAllowed {
                allowed: Vec::new(),
            },
            "not_linked" => Self::NotLinked,
            "no_issue_no_reference" => Self::NoIssueNoReference,
            "linkage_error" => Self::LinkageError,
            "no_assignee" => Self::NoAssignee,
            "assignee_mismatch" => Self::AssigneeMismatch,
            other => Self::Unknown(other.to_owned()),
        })
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.code())
    }
}

/// Outcome of validating one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    valid: bool,
    reason: ValidationReason,
    issue: Option<Issue>,
}

impl ValidationResult {
    /// A passing result.
    #[must_use]
    pub const fn pass(reason: ValidationReason, issue: Option<Issue>) -> Self {
        Self {
            valid: true,
            reason,
            issue,
        }
    }

    /// A failing result.
    #[must_use]
    pub const fn fail(reason: ValidationReason, issue: Option<Issue>) -> Self {
        Self {
            valid: false,
            reason,
            issue,
        }
    }

    /// Whether the pull request passed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Why it passed or failed.
    #[must_use]
    pub const fn reason(&self) -> &ValidationReason {
        &self.reason
    }

    /// The resolved issue, when linkage produced one.
    #[must_use]
    pub const fn issue(&self) -> Option<&Issue> {
        self.issue.as_ref()
    }
}
