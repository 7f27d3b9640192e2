//! Side effects for pull requests that fail validation.
//!
//! The [`FailureHandler`] posts an explanatory comment and, when configured,
//! closes the pull request. It is the only component that writes to GitHub.

mod message;

pub use message::{MessageCatalogue, MessageKind, MessageTemplateError, render_message};

use crate::config::GateSettings;
use crate::github::gateway::PullRequestGateway;
use crate::github::models::PullRequestContext;
use crate::telemetry::{TelemetryEvent, TelemetrySink};
use crate::validation::ValidationResult;

/// Comments on, and optionally closes, failing pull requests.
pub struct FailureHandler<'a> {
    settings: &'a GateSettings,
    gateway: &'a dyn PullRequestGateway,
    telemetry: &'a dyn TelemetrySink,
}

impl<'a> FailureHandler<'a> {
    /// Creates a handler.
    #[must_use]
    pub const fn new(
        settings: &'a GateSettings,
        gateway: &'a dyn PullRequestGateway,
        telemetry: &'a dyn TelemetrySink,
    ) -> Self {
        Self {
            settings,
            gateway,
            telemetry,
        }
    }

    /// Posts the failure comment, then closes the pull request when
    /// close-on-failure is enabled.
    ///
    /// Both steps are always attempted; a failed comment does not stop the
    /// close. Returns true only when every attempted step succeeded.
    pub async fn handle_failure(
        &self,
        pull_request: &PullRequestContext,
        result: &ValidationResult,
    ) -> bool {
        let message = MessageCatalogue::new(&self.settings.messages).message_for(pull_request, result);
        let commented = self.post_comment(pull_request, &message).await;

        if !self.settings.close_on_failure {
            tracing::info!(
                pull_request = %pull_request.locator,
                reason = %result.reason(),
                "validation failed but pull request left open"
            );
            return commented;
        }

        let closed = self.close(pull_request).await;
        if closed {
            tracing::info!(
                pull_request = %pull_request.locator,
                reason = %result.reason(),
                "pull request closed due to validation failure"
            );
        }
        commented && closed
    }

    async fn post_comment(&self, pull_request: &PullRequestContext, message: &str) -> bool {
        let pull_request_name = pull_request.locator.to_string();
        match self.gateway.post_comment(&pull_request.locator, message).await {
            Ok(()) => {
                tracing::info!(pull_request = %pull_request_name, "posted failure comment");
                self.telemetry.record(TelemetryEvent::CommentPosted {
                    pull_request: pull_request_name,
                });
                true
            }
            Err(error) => {
                tracing::error!(pull_request = %pull_request_name, %error, "failed to post comment");
                self.telemetry.record(TelemetryEvent::CommentFailed {
                    pull_request: pull_request_name,
                    message: error.to_string(),
                });
                false
            }
        }
    }

    async fn close(&self, pull_request: &PullRequestContext) -> bool {
        let pull_request_name = pull_request.locator.to_string();
        match self.gateway.close_pull_request(&pull_request.locator).await {
            Ok(()) => {
                self.telemetry.record(TelemetryEvent::PullRequestClosed {
                    pull_request: pull_request_name,
                });
                true
            }
            Err(error) => {
                tracing::error!(pull_request = %pull_request_name, %error, "failed to close pull request");
                self.telemetry.record(TelemetryEvent::CloseFailed {
                    pull_request: pull_request_name,
                    message: error.to_string(),
                });
                false
            }
        }
    }
}

#[cfg(test)]
mod tests;
