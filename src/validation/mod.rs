//! The pull request rule pipeline.
//!
//! [`PullRequestValidator::validate`] applies the rules in a fixed order and
//! stops at the first failure:
//!
//! 1. actor exemption (bots, then the skip list);
//! 2. target branch allow-list;
//! 3. issue linkage, with the optional description fallback;
//! 4. assignee match, when required and an issue was resolved.
//!
//! Exemptions are decided before any network call. The validator never
//! comments on or closes a pull request; that is the job of
//! [`crate::outcome::FailureHandler`].

mod branch;
mod reason;

pub use branch::{BranchDecision, check_target_branch, effective_allow_list};
pub use reason::{ValidationReason, ValidationResult};

use crate::config::GateSettings;
use crate::github::gateway::PullRequestGateway;
use crate::github::models::{Issue, PullRequestContext};
use crate::linkage::{DescriptionReferenceCheck, IssueLinkResolver, LinkOutcome, ReferenceOutcome};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Applies the gate's rules to a pull request.
pub struct PullRequestValidator<'a> {
    settings: &'a GateSettings,
    gateway: &'a dyn PullRequestGateway,
    resolver: IssueLinkResolver<'a>,
    telemetry: &'a dyn TelemetrySink,
}

impl<'a> PullRequestValidator<'a> {
    /// Creates a validator whose linkage chain follows
    /// [`GateSettings::link_strategies`].
    #[must_use]
    pub fn new(
        settings: &'a GateSettings,
        gateway: &'a dyn PullRequestGateway,
        telemetry: &'a dyn TelemetrySink,
    ) -> Self {
        let resolver = IssueLinkResolver::from_kinds(&settings.link_strategies, gateway);
        Self::with_resolver(settings, gateway, resolver, telemetry)
    }

    /// Creates a validator with a caller-built linkage chain.
    #[must_use]
    pub const fn with_resolver(
        settings: &'a GateSettings,
        gateway: &'a dyn PullRequestGateway,
        resolver: IssueLinkResolver<'a>,
        telemetry: &'a dyn TelemetrySink,
    ) -> Self {
        Self {
            settings,
            gateway,
            resolver,
            telemetry,
        }
    }

    /// Validates `pull_request`.
    ///
    /// Lookup failures never escape as errors: they become a failing result
    /// with [`ValidationReason::LinkageError`].
    pub async fn validate(&self, pull_request: &PullRequestContext) -> ValidationResult {
        tracing::info!(
            pull_request = %pull_request.locator,
            author = %pull_request.author.login,
            branch = %pull_request.base_branch,
            "validating pull request"
        );

        let result = self.run_rules(pull_request).await;

        if result.is_valid() {
            tracing::info!(
                pull_request = %pull_request.locator,
                reason = %result.reason(),
                "validation passed"
            );
        } else {
            tracing::warn!(
                pull_request = %pull_request.locator,
                reason = %result.reason(),
                description = %result.reason().description(),
                "validation failed"
            );
        }
        self.telemetry.record(TelemetryEvent::ValidationCompleted {
            pull_request: pull_request.locator.to_string(),
            valid: result.is_valid(),
            reason: result.reason().code().to_owned(),
        });
        result
    }

    async fn run_rules(&self, pull_request: &PullRequestContext) -> ValidationResult {
        if let Some(exemption) = self.exemption(pull_request) {
            return ValidationResult::pass(exemption, None);
        }

        let decision = check_target_branch(
            &self.settings.target_branches,
            &pull_request.base_branch,
            pull_request.locator.repository(),
            self.gateway,
            self.telemetry,
        )
        .await;
        if let BranchDecision::Rejected(allowed) = decision {
            return ValidationResult::fail(ValidationReason::BranchNotAllowed { allowed }, None);
        }

        let issue = match self.link_issue(pull_request).await {
            Ok(issue) => issue,
            Err(reason) => return ValidationResult::fail(reason, None),
        };

        if self.settings.require_assignee {
            let assignee_failure = issue
                .as_ref()
                .map(|linked| check_assignee(linked, &pull_request.author.login));
            match assignee_failure {
                Some(Some(reason)) => return ValidationResult::fail(reason, issue),
                Some(None) => {}
                None => {
                    tracing::warn!(
                        pull_request = %pull_request.locator,
                        "linked by cross-repository reference; assignee not checked"
                    );
                    self.telemetry.record(TelemetryEvent::AssigneeCheckSkipped {
                        pull_request: pull_request.locator.to_string(),
                    });
                }
            }
        }

        ValidationResult::pass(ValidationReason::AllPassed, issue)
    }

    fn exemption(&self, pull_request: &PullRequestContext) -> Option<ValidationReason> {
        let author = &pull_request.author;
        if author.is_bot {
            tracing::info!(author = %author.login, "skipping validation for bot user");
            return Some(ValidationReason::ExemptBot);
        }
        if self.settings.is_skipped(&author.login) {
            tracing::info!(author = %author.login, "skipping validation for user in skip list");
            return Some(ValidationReason::ExemptSkipList);
        }
        None
    }

    /// Resolves linkage. `Ok(None)` means linkage is satisfied by a
    /// description reference into another repository.
    async fn link_issue(
        &self,
        pull_request: &PullRequestContext,
    ) -> Result<Option<Issue>, ValidationReason> {
        match self.resolver.resolve(pull_request).await {
            LinkOutcome::Linked(issue) => {
                tracing::info!(issue = issue.number, "pull request is linked to an issue");
                Ok(Some(issue))
            }
            LinkOutcome::LookupError(error) => {
                tracing::error!(%error, "issue linkage lookup failed");
                Err(ValidationReason::LinkageError)
            }
            LinkOutcome::NotLinked if !self.settings.check_issue_reference => {
                tracing::info!("no linked issue found");
                Err(ValidationReason::NotLinked)
            }
            LinkOutcome::NotLinked => {
                tracing::info!("no linked issue found; checking description for a reference");
                match DescriptionReferenceCheck::new(self.gateway)
                    .check(pull_request)
                    .await
                {
                    ReferenceOutcome::Unreferenced => Err(ValidationReason::NoIssueNoReference),
                    ReferenceOutcome::Referenced { issue, .. } => Ok(issue),
                    ReferenceOutcome::LookupFailed { .. } => Err(ValidationReason::LinkageError),
                }
            }
        }
    }
}

fn check_assignee(issue: &Issue, author: &str) -> Option<ValidationReason> {
    if issue.is_unassigned() {
        tracing::info!(issue = issue.number, "linked issue has no assignee");
        return Some(ValidationReason::NoAssignee);
    }
    if issue.is_assigned_to(author) {
        tracing::info!(issue = issue.number, author, "author is assigned to the linked issue");
        None
    } else {
        tracing::info!(
            issue = issue.number,
            author,
            assignees = ?issue.assignees,
            "author is not assigned to the linked issue"
        );
        Some(ValidationReason::AssigneeMismatch)
    }
}
