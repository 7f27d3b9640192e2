//! Failure comment templates.
//!
//! Each failure reason maps onto one of four configured templates. Templates
//! are rendered with Jinja2 syntax and have these variables available:
//!
//! - `reason`: stable reason code, e.g. `assignee_mismatch`
//! - `description`: human-readable reason
//! - `author`: pull request author login
//! - `branch`: branch the pull request targets
//! - `allowed_branches`: comma-separated allow-list (only for
//!   `branch_not_allowed`; empty otherwise)
//! - `issue`: resolved issue number, or empty
//!
//! # Example
//!
//! ```text
//! @{{ author }}: please link an issue. ({{ reason }})
//! ```

use minijinja::{Environment, context};
use thiserror::Error;

use crate::config::MessageTemplates;
use crate::github::models::PullRequestContext;
use crate::validation::{ValidationReason, ValidationResult};

/// Errors produced while rendering a message template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageTemplateError {
    /// The template has invalid Jinja2 syntax.
    #[error("invalid message template syntax: {message}")]
    InvalidSyntax {
        /// Parser error detail.
        message: String,
    },

    /// The template parsed but failed to render.
    #[error("message template rendering failed: {message}")]
    RenderFailed {
        /// Renderer error detail.
        message: String,
    },
}

/// Which configured template a failure uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// No linked or referenced issue.
    NoIssue,
    /// Assignee missing or mismatched.
    NoAssignee,
    /// Target branch not allowed.
    InvalidBranch,
    /// Anything else.
    Fallback,
}

impl MessageKind {
    /// Maps a reason onto its template.
    #[must_use]
    pub const fn for_reason(reason: &ValidationReason) -> Self {
        match reason {
            ValidationReason::NotLinked | ValidationReason::NoIssueNoReference => Self::NoIssue,
            ValidationReason::NoAssignee | ValidationReason::AssigneeMismatch => Self::NoAssignee,
            ValidationReason::BranchNotAllowed { .. } => Self::InvalidBranch,
            _ => Self::Fallback,
        }
    }
}

/// Renders failure comments from the configured templates.
#[derive(Debug, Clone)]
pub struct MessageCatalogue<'a> {
    templates: &'a MessageTemplates,
}

impl<'a> MessageCatalogue<'a> {
    /// Creates a catalogue over `templates`.
    #[must_use]
    pub const fn new(templates: &'a MessageTemplates) -> Self {
        Self { templates }
    }

    /// The raw template for `kind`.
    #[must_use]
    pub fn template(&self, kind: MessageKind) -> &'a str {
        match kind {
            MessageKind::NoIssue => &self.templates.no_issue,
            MessageKind::NoAssignee => &self.templates.no_assignee,
            MessageKind::InvalidBranch => &self.templates.invalid_branch,
            MessageKind::Fallback => &self.templates.fallback,
        }
    }

    /// Builds the comment for a failed result.
    ///
    /// A template that fails to parse or render is used verbatim.
    #[must_use]
    pub fn message_for(&self, pull_request: &PullRequestContext, result: &ValidationResult) -> String {
        let kind = MessageKind::for_reason(result.reason());
        let template = self.template(kind);
        render_message(template, pull_request, result).unwrap_or_else(|error| {
            tracing::error!(?kind, %error, "failed to render failure message; using raw template");
            template.to_owned()
        })
    }
}

/// Renders `template_source` for a failed validation result.
///
/// # Errors
///
/// Returns [`MessageTemplateError::InvalidSyntax`] when the template fails to
/// parse, or [`MessageTemplateError::RenderFailed`] when rendering fails.
pub fn render_message(
    template_source: &str,
    pull_request: &PullRequestContext,
    result: &ValidationResult,
) -> Result<String, MessageTemplateError> {
    let mut environment = Environment::new();
    environment.set_auto_escape_callback(|_| minijinja::AutoEscape::None);

    environment
        .add_template("message", template_source)
        .map_err(|error| MessageTemplateError::InvalidSyntax {
            message: error.to_string(),
        })?;

    let reason = result.reason();
    let issue = result
        .issue()
        .map_or_else(String::new, |issue| issue.number.to_string());

    let template =
        environment
            .get_template("message")
            .map_err(|error| MessageTemplateError::RenderFailed {
                message: error.to_string(),
            })?;

    template
        .render(context! {
            reason => reason.code(),
            description => reason.description(),
            author => pull_request.author.login.as_str(),
            branch => pull_request.base_branch.as_str(),
            allowed_branches => reason.allowed_branches().join(", "),
            issue => issue,
        })
        .map_err(|error| MessageTemplateError::RenderFailed {
            message: error.to_string(),
        })
}
