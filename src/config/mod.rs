//! Gate configuration loaded from action inputs, environment, and files.
//!
//! GitHub Actions exposes each action input as an `INPUT_<NAME>` environment
//! variable, so the layered [`GateConfig`] uses the `INPUT` prefix. Values
//! arrive as text; [`GateConfig::settings`] resolves them once into the
//! immutable [`GateSettings`] the validator and outcome handler consume.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in defaults
//! 2. **Configuration file** – `.issuegate.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `INPUT_GITHUB_TOKEN`, `INPUT_SKIP_USERS`, ...
//! 4. **Command-line arguments** – `--github-token`, `--skip-users`, ...
//!
//! # Configuration File
//!
//! ```toml
//! skip_users = "renovate, release-bot"
//! target_branches = """
//! develop
//! release
//! """
//! require_assignee = "true"
//! check_issue_reference = "true"
//! link_strategies = "closing-references, keyword-scan"
//! invalid_branch_message = "Please target one of: {{ allowed_branches }}"
//! ```

mod settings;

pub use settings::{GateSettings, LinkStrategyKind, MessageTemplates, parse_flag, parse_list};

use std::env;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::github::error::GateError;
use crate::github::locator::PersonalAccessToken;

const DEFAULT_API_URL: &str = "https://api.github.com";

/// Raw gate configuration supporting CLI, environment, and file sources.
///
/// Every input is carried as text, exactly as the runner supplies it. Blank
/// values count as unset.
///
/// # Environment Variables
///
/// - `INPUT_GITHUB_TOKEN` (or `GITHUB_TOKEN`): API token
/// - `INPUT_SKIP_USERS`: comma-separated logins exempt from validation
/// - `INPUT_TARGET_BRANCHES`: newline-separated branch allow-list
/// - `INPUT_REQUIRE_ASSIGNEE`, `INPUT_CLOSE_PR_ON_FAILURE`,
///   `INPUT_CHECK_ISSUE_REFERENCE`: boolean toggles
/// - `INPUT_EVENT_PATH` (or `GITHUB_EVENT_PATH`): event payload file
/// - `INPUT_API_URL` (or `GITHUB_API_URL`): REST API base URL
///
/// # Example
///
/// ```no_run
/// use issuegate::GateConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = GateConfig::load().expect("failed to load configuration");
/// let settings = config.settings().expect("token required");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "INPUT",
    discovery(
        dotfile_name = ".issuegate.toml",
        config_file_name = "issuegate.toml",
        app_name = "issuegate"
    )
)]
pub struct GateConfig {
    /// Token used for GitHub API calls.
    ///
    /// Falls back to the `GITHUB_TOKEN` environment variable.
    #[ortho_config()]
    pub github_token: Option<String>,

    /// Comma-separated logins whose pull requests are never validated.
    #[ortho_config()]
    pub skip_users: Option<String>,

    /// Branches pull requests may target, one per line. The repository's
    /// default branch is always allowed once a list is configured.
    #[ortho_config()]
    pub target_branches: Option<String>,

    /// Require the linked issue to be assigned to the pull request author.
    #[ortho_config()]
    pub require_assignee: Option<String>,

    /// Close the pull request when validation fails. Defaults to true.
    #[ortho_config()]
    pub close_pr_on_failure: Option<String>,

    /// Accept a closing keyword reference in the description when no linked
    /// issue is found.
    #[ortho_config()]
    pub check_issue_reference: Option<String>,

    /// Ordered linkage strategies (`closing-references`, `keyword-scan`).
    #[ortho_config()]
    pub link_strategies: Option<String>,

    /// Comment template for pull requests without a linked issue.
    #[ortho_config()]
    pub no_issue_message: Option<String>,

    /// Comment template for assignee failures.
    #[ortho_config()]
    pub no_assignee_message: Option<String>,

    /// Legacy name for `no_assignee_message`, used when that is unset.
    #[ortho_config()]
    pub assignee_mismatch_message: Option<String>,

    /// Comment template for pull requests targeting a disallowed branch.
    #[ortho_config()]
    pub invalid_branch_message: Option<String>,

    /// Comment template for every other failure.
    #[ortho_config()]
    pub fallback_message: Option<String>,

    /// Path of the event payload. Falls back to `GITHUB_EVENT_PATH`.
    #[ortho_config()]
    pub event_path: Option<String>,

    /// REST API base URL. Falls back to `GITHUB_API_URL`, then
    /// `https://api.github.com`.
    #[ortho_config()]
    pub api_url: Option<String>,

    /// Emit decision telemetry to stderr as JSON lines.
    #[ortho_config()]
    pub telemetry: Option<String>,
}

/// Returns the trimmed value when it is present and not blank.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn env_non_blank(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

impl GateConfig {
    /// Resolves the token from configuration or the `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::MissingToken`] when no source provides a value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, GateError> {
        let value = non_blank(self.github_token.as_deref())
            .map(ToOwned::to_owned)
            .or_else(|| env_non_blank("GITHUB_TOKEN"))
            .ok_or(GateError::MissingToken)?;
        PersonalAccessToken::new(value)
    }

    /// Resolves the event payload path from configuration or
    /// `GITHUB_EVENT_PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::MissingEventPath`] when neither is set.
    pub fn resolve_event_path(&self) -> Result<Utf8PathBuf, GateError> {
        non_blank(self.event_path.as_deref())
            .map(ToOwned::to_owned)
            .or_else(|| env_non_blank("GITHUB_EVENT_PATH"))
            .map(Utf8PathBuf::from)
            .ok_or(GateError::MissingEventPath)
    }

    /// Resolves the REST API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidUrl`] when the configured value is not a
    /// URL.
    pub fn resolve_api_url(&self) -> Result<Url, GateError> {
        let raw = non_blank(self.api_url.as_deref())
            .map(ToOwned::to_owned)
            .or_else(|| env_non_blank("GITHUB_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        Url::parse(&raw).map_err(|error| GateError::InvalidUrl(format!("{raw}: {error}")))
    }

    /// Whether the stderr telemetry sink is enabled.
    #[must_use]
    pub fn telemetry_enabled(&self) -> bool {
        non_blank(self.telemetry.as_deref()).is_some_and(parse_flag)
    }

    /// Resolves the immutable settings used for one validation run.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::MissingToken`] when no token is configured and
    /// [`GateError::Configuration`] when the strategy list names an unknown
    /// strategy.
    pub fn settings(&self) -> Result<GateSettings, GateError> {
        let token = self.resolve_token()?;
        let defaults = GateSettings::new(token);

        let link_strategies = match non_blank(self.link_strategies.as_deref()) {
            Some(raw) => LinkStrategyKind::parse_list(raw)?,
            None => defaults.link_strategies.clone(),
        };

        let template = |value: Option<&str>, fallback: &str| {
            non_blank(value).map_or_else(|| fallback.to_owned(), ToOwned::to_owned)
        };
        let no_assignee_source = non_blank(self.no_assignee_message.as_deref())
            .or_else(|| non_blank(self.assignee_mismatch_message.as_deref()));
        let messages = MessageTemplates {
            no_issue: template(self.no_issue_message.as_deref(), defaults.messages.no_issue.as_str()),
            no_assignee: template(no_assignee_source, defaults.messages.no_assignee.as_str()),
            invalid_branch: template(
                self.invalid_branch_message.as_deref(),
                defaults.messages.invalid_branch.as_str(),
            ),
            fallback: template(self.fallback_message.as_deref(), defaults.messages.fallback.as_str()),
        };

        let flag = |value: Option<&str>, default: bool| non_blank(value).map_or(default, parse_flag);

        let settings = GateSettings {
            skip_users: self
                .skip_users
                .as_deref()
                .map(|raw| parse_list(raw, &[',']).into_iter().collect())
                .unwrap_or_default(),
            target_branches: self
                .target_branches
                .as_deref()
                .map(|raw| parse_list(raw, &['\n']))
                .unwrap_or_default(),
            require_assignee: flag(self.require_assignee.as_deref(), defaults.require_assignee),
            close_on_failure: flag(self.close_pr_on_failure.as_deref(), defaults.close_on_failure),
            check_issue_reference: flag(
                self.check_issue_reference.as_deref(),
                defaults.check_issue_reference,
            ),
            link_strategies,
            messages,
            ..defaults
        };

        tracing::info!(
            skip_users = ?settings.skip_users,
            target_branches = ?settings.target_branches,
            require_assignee = settings.require_assignee,
            close_on_failure = settings.close_on_failure,
            check_issue_reference = settings.check_issue_reference,
            link_strategies = ?settings.link_strategies,
            "configuration loaded"
        );

        Ok(settings)
    }
}

#[cfg(test)]
mod tests;
