//! Issuegate library crate: a pull request policy gate for GitHub Actions.
//!
//! The gate reads the pull request from the Actions event payload, checks
//! that its author is exempt or that it targets an allowed branch, links an
//! issue, and (optionally) is assigned that issue. Failing pull requests get
//! an explanatory comment and are closed when configured to be.
//!
//! - [`config`] loads layered action inputs into [`GateSettings`].
//! - [`github`] parses the event payload and talks to the GitHub API.
//! - [`linkage`] finds the issue a pull request would close.
//! - [`validation`] applies the rule pipeline.
//! - [`outcome`] comments on and closes failing pull requests.
//! - [`telemetry`] records structured decision events.

pub mod config;
pub mod github;
pub mod linkage;
pub mod outcome;
pub mod telemetry;
pub mod validation;

pub use config::{GateConfig, GateSettings, LinkStrategyKind, MessageTemplates};
pub use github::{
    GateError, OctocrabGateway, PersonalAccessToken, PullRequestContext, PullRequestGateway,
    PullRequestLocator, RepositoryLocator, load_event,
};
pub use linkage::{IssueLinkResolver, IssueLinkStrategy, LinkOutcome};
pub use outcome::FailureHandler;
pub use telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink};
pub use validation::{PullRequestValidator, ValidationReason, ValidationResult};
