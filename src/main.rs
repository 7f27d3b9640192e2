//! Issuegate entrypoint: validates the pull request named by the Actions
//! event payload.

use std::io;
use std::process::ExitCode;

use issuegate::{
    FailureHandler, GateConfig, GateError, NoopTelemetrySink, OctocrabGateway,
    PullRequestValidator, StderrJsonlTelemetrySink, TelemetrySink, load_event,
};
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ISSUEGATE_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            tracing::error!(%error, "issuegate could not run");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ignored = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Validates the pull request, handling the failure when it does not pass.
///
/// Returns whether the pull request passed (or was exempt).
async fn run() -> Result<bool, GateError> {
    let config = load_config()?;
    let settings = config.settings()?;
    let event_path = config.resolve_event_path()?;
    let pull_request = load_event(&event_path)?;
    let api_base = config.resolve_api_url()?;
    let gateway = OctocrabGateway::for_token(&settings.token, &api_base)?;

    let telemetry: Box<dyn TelemetrySink> = if config.telemetry_enabled() {
        Box::new(StderrJsonlTelemetrySink)
    } else {
        Box::new(NoopTelemetrySink)
    };

    let result = PullRequestValidator::new(&settings, &gateway, telemetry.as_ref())
        .validate(&pull_request)
        .await;
    if result.is_valid() {
        return Ok(true);
    }

    let handled = FailureHandler::new(&settings, &gateway, telemetry.as_ref())
        .handle_failure(&pull_request, &result)
        .await;
    if !handled {
        tracing::warn!(
            pull_request = %pull_request.locator,
            "failure handling did not complete"
        );
    }
    Ok(false)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`GateError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<GateConfig, GateError> {
    GateConfig::load().map_err(|error| GateError::Configuration {
        message: error.to_string(),
    })
}
