//! Pull request event intake from the GitHub Actions event payload.
//!
//! The runner writes the triggering webhook payload to the file named by
//! `GITHUB_EVENT_PATH`. Only the fields the gate needs are deserialised; the
//! rest of the payload is ignored.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;

use super::error::GateError;
use super::locator::{PullRequestLocator, PullRequestNumber, RepositoryLocator};
use super::models::{Author, PullRequestContext};

const BOT_ACCOUNT_TYPE: &str = "Bot";

#[derive(Debug, Deserialize)]
struct ApiEvent {
    pull_request: Option<ApiEventPullRequest>,
    repository: Option<ApiEventRepository>,
}

#[derive(Debug, Deserialize)]
struct ApiEventPullRequest {
    number: u64,
    body: Option<String>,
    user: ApiEventUser,
    base: ApiEventBase,
}

#[derive(Debug, Deserialize)]
struct ApiEventUser {
    login: String,
    #[serde(rename = "type")]
    account_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiEventBase {
    #[serde(rename = "ref")]
    branch: String,
    repo: Option<ApiEventRepository>,
}

#[derive(Debug, Deserialize)]
struct ApiEventRepository {
    full_name: String,
}

/// Parses a pull request event payload.
///
/// The repository identity comes from `repository.full_name`, falling back to
/// the pull request's base repository when the top-level field is absent.
///
/// # Errors
///
/// Returns [`GateError::InvalidEvent`] when the payload is not valid JSON or
/// lacks required fields, [`GateError::MissingPullRequest`] when the event is
/// not a pull request event, and [`GateError::InvalidRepository`] or
/// [`GateError::InvalidPullRequestNumber`] for malformed identities.
pub fn parse_event(payload: &str) -> Result<PullRequestContext, GateError> {
    let event: ApiEvent = serde_json::from_str(payload).map_err(|error| GateError::InvalidEvent {
        message: error.to_string(),
    })?;

    let pull_request = event.pull_request.ok_or(GateError::MissingPullRequest)?;
    let full_name = event
        .repository
        .or(pull_request.base.repo)
        .map(|repository| repository.full_name)
        .ok_or_else(|| GateError::InvalidEvent {
            message: "repository full_name is missing".to_owned(),
        })?;

    let repository = RepositoryLocator::from_full_name(&full_name)?;
    let number = PullRequestNumber::new(pull_request.number)?;
    let is_bot = pull_request
        .user
        .account_type
        .as_deref()
        .is_some_and(|kind| kind == BOT_ACCOUNT_TYPE);

    Ok(PullRequestContext {
        locator: PullRequestLocator::new(repository, number),
        author: Author {
            login: pull_request.user.login,
            is_bot,
        },
        body: pull_request.body.unwrap_or_default(),
        base_branch: pull_request.base.branch,
    })
}

/// Reads and parses the event payload stored at `path`.
///
/// # Errors
///
/// Returns [`GateError::InvalidEvent`] when the file cannot be read, and any
/// error from [`parse_event`].
pub fn load_event(path: &Utf8Path) -> Result<PullRequestContext, GateError> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };
    let file_name = path.file_name().ok_or_else(|| GateError::InvalidEvent {
        message: format!("invalid event path '{path}': no file name"),
    })?;

    let payload = Dir::open_ambient_dir(&parent, ambient_authority())
        .and_then(|dir| dir.read_to_string(file_name))
        .map_err(|error| GateError::InvalidEvent {
            message: format!("failed to read '{path}': {error}"),
        })?;

    parse_event(&payload)
}
