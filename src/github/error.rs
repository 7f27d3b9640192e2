//! Error types exposed by the GitHub gateway and event intake layers.

use thiserror::Error;

/// Errors surfaced while loading the event, reading configuration, or
/// communicating with GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateError {
    /// The authentication token was missing.
    #[error("GitHub token is required")]
    MissingToken,

    /// No event payload path was configured or exported by the runner.
    #[error("event payload path is required (set GITHUB_EVENT_PATH)")]
    MissingEventPath,

    /// The event payload could not be read or parsed.
    #[error("event payload is invalid: {message}")]
    InvalidEvent {
        /// Details about the payload failure.
        message: String,
    },

    /// The event payload carried no pull request.
    #[error("no pull request data found in event")]
    MissingPullRequest,

    /// The repository identity could not be parsed.
    #[error("repository must be given as owner/name: {0}")]
    InvalidRepository(String),

    /// The pull request number is not a valid integer.
    #[error("pull request number must be a positive integer")]
    InvalidPullRequestNumber,

    /// The API base URL could not be parsed.
    #[error("GitHub API URL is invalid: {0}")]
    InvalidUrl(String),

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// Rate limit exceeded - the API returned 403/429 with a rate limit message.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Error message from GitHub.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}
