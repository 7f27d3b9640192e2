//! Structured decision events and sinks.
//!
//! Components receive a [`TelemetrySink`] at construction and record one event
//! per decision or side effect. Diagnostic logging goes through `tracing`;
//! telemetry is the machine-readable trail of what the gate decided and did.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// The rule pipeline produced a result.
    ValidationCompleted {
        /// Pull request in `owner/repo#number` form.
        pull_request: String,
        /// Whether the pull request passed.
        valid: bool,
        /// Stable reason code.
        reason: String,
    },
    /// The default branch could not be looked up; the configured allow-list
    /// was used on its own.
    DefaultBranchLookupFailed {
        /// Error detail from the gateway.
        message: String,
    },
    /// Linkage was satisfied without a concrete issue, so assignees were not
    /// checked.
    AssigneeCheckSkipped {
        /// Pull request in `owner/repo#number` form.
        pull_request: String,
    },
    /// The failure comment was posted.
    CommentPosted {
        /// Pull request in `owner/repo#number` form.
        pull_request: String,
    },
    /// Posting the failure comment failed.
    CommentFailed {
        /// Pull request in `owner/repo#number` form.
        pull_request: String,
        /// Error detail from the gateway.
        message: String,
    },
    /// The pull request was closed.
    PullRequestClosed {
        /// Pull request in `owner/repo#number` form.
        pull_request: String,
    },
    /// Closing the pull request failed.
    CloseFailed {
        /// Pull request in `owner/repo#number` form.
        pull_request: String,
        /// Error detail from the gateway.
        message: String,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Sink that keeps events in memory for assertions.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingTelemetrySink {
    events: std::sync::Mutex<Vec<TelemetryEvent>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingTelemetrySink {
    /// Removes and returns every recorded event.
    #[must_use]
    pub fn take(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .map(|mut events| events.drain(..).collect())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl TelemetrySink for RecordingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
