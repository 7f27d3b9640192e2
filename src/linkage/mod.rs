//! Issue linkage: finding the issue a pull request would close.
//!
//! Linkage is resolved by an ordered chain of [`IssueLinkStrategy`] objects.
//! The [`IssueLinkResolver`] asks each in turn and stops at the first
//! definitive answer, so a failed lookup is never mistaken for "no issue".
//! The description-only [`DescriptionReferenceCheck`] sits outside the chain;
//! the validator consults it only when the chain reports no link.

mod fallback;
pub mod keywords;
mod strategies;

pub use fallback::{DescriptionReferenceCheck, ReferenceOutcome};
pub use keywords::IssueReference;
pub use strategies::{ClosingReferenceStrategy, KeywordScanStrategy};

use async_trait::async_trait;

use crate::config::LinkStrategyKind;
use crate::github::error::GateError;
use crate::github::gateway::PullRequestGateway;
use crate::github::models::{Issue, PullRequestContext};

/// Result of one linkage attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The pull request is linked to this issue.
    Linked(Issue),
    /// The strategy found nothing.
    NotLinked,
    /// A lookup failed; linkage is undetermined.
    LookupError(GateError),
}

impl LinkOutcome {
    /// Stable outcome code used in logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Linked(_) => "linked",
            Self::NotLinked => "not_linked",
            Self::LookupError(_) => "lookup_error",
        }
    }

    const fn is_definitive(&self) -> bool {
        !matches!(self, Self::NotLinked)
    }
}

/// One way of finding the issue a pull request is linked to.
#[async_trait]
pub trait IssueLinkStrategy: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Attempts to resolve the linked issue.
    async fn resolve(&self, pull_request: &PullRequestContext) -> LinkOutcome;
}

/// Ordered chain of linkage strategies.
pub struct IssueLinkResolver<'a> {
    strategies: Vec<Box<dyn IssueLinkStrategy + 'a>>,
}

impl<'a> IssueLinkResolver<'a> {
    /// Creates a resolver that tries `strategies` in order.
    #[must_use]
    pub const fn new(strategies: Vec<Box<dyn IssueLinkStrategy + 'a>>) -> Self {
        Self { strategies }
    }

    /// Builds the chain named by `kinds`, backed by `gateway`.
    #[must_use]
    pub fn from_kinds(kinds: &[LinkStrategyKind], gateway: &'a dyn PullRequestGateway) -> Self {
        let strategies = kinds
            .iter()
            .map(|kind| -> Box<dyn IssueLinkStrategy + 'a> {
                match kind {
                    LinkStrategyKind::ClosingReferences => {
                        Box::new(ClosingReferenceStrategy::new(gateway))
                    }
                    LinkStrategyKind::KeywordScan => Box::new(KeywordScanStrategy::new(gateway)),
                }
            })
            .collect();
        Self::new(strategies)
    }

    /// Number of strategies in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true when the chain has no strategies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Runs the chain, returning the first `Linked` or `LookupError`
    /// outcome. An empty chain, or one where every strategy finds nothing,
    /// yields [`LinkOutcome::NotLinked`].
    pub async fn resolve(&self, pull_request: &PullRequestContext) -> LinkOutcome {
        for strategy in &self.strategies {
            let outcome = strategy.resolve(pull_request).await;
            tracing::debug!(
                strategy = strategy.name(),
                outcome = outcome.code(),
                pull_request = %pull_request.locator,
                "link strategy finished"
            );
            if outcome.is_definitive() {
                return outcome;
            }
        }
        LinkOutcome::NotLinked
    }
}
