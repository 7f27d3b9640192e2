//! Target branch allow-list.

use std::collections::BTreeSet;

use crate::github::gateway::PullRequestGateway;
use crate::github::locator::RepositoryLocator;
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Outcome of the branch rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchDecision {
    /// No allow-list is configured.
    Unrestricted,
    /// The target branch is allowed.
    Allowed,
    /// The target branch is not in the effective allow-list, which is
    /// carried sorted and deduplicated.
    Rejected(Vec<String>),
}

/// Builds the effective allow-list: the configured branches plus the
/// repository's default branch, sorted and deduplicated.
#[must_use]
pub fn effective_allow_list(configured: &[String], default_branch: Option<&str>) -> Vec<String> {
    configured
        .iter()
        .map(String::as_str)
        .chain(default_branch)
        .map(ToOwned::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Applies the allow-list to `target`.
///
/// The default branch lookup only happens when an allow-list is configured.
/// A failed lookup falls back to the configured list on its own.
pub async fn check_target_branch(
    configured: &[String],
    target: &str,
    repository: &RepositoryLocator,
    gateway: &dyn PullRequestGateway,
    telemetry: &dyn TelemetrySink,
) -> BranchDecision {
    if configured.is_empty() {
        tracing::debug!("no target branch restriction configured");
        return BranchDecision::Unrestricted;
    }

    let default_branch = match gateway.default_branch(repository).await {
        Ok(branch) => Some(branch),
        Err(error) => {
            tracing::warn!(
                %repository,
                %error,
                "default branch lookup failed; using configured branches only"
            );
            telemetry.record(TelemetryEvent::DefaultBranchLookupFailed {
                message: error.to_string(),
            });
            None
        }
    };

    let allowed = effective_allow_list(configured, default_branch.as_deref());
    if allowed.iter().any(|branch| branch == target) {
        tracing::info!(branch = target, "target branch allowed");
        BranchDecision::Allowed
    } else {
        tracing::info!(branch = target, allowed = ?allowed, "target branch not allowed");
        BranchDecision::Rejected(allowed)
    }
}
