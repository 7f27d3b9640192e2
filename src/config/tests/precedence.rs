//! Tests for configuration layer precedence.

use rstest::rstest;
use serde_json::{Value, json};

use super::helpers::build_config_from_layers;

#[rstest]
#[case::file_overrides_defaults(
    vec![("defaults", json!({"skip_users": "default-bot"})), ("file", json!({"skip_users": "file-bot"}))],
    "skip_users",
    "file-bot",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"github_token": "file-token"})), ("environment", json!({"github_token": "env-token"}))],
    "github_token",
    "env-token",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![("environment", json!({"require_assignee": "false"})), ("cli", json!({"require_assignee": "true"}))],
    "require_assignee",
    "true",
    "CLI should override environment"
)]
#[case::target_branches_defaults_file_env_cli(
    vec![
        ("defaults", json!({"target_branches": "default"})),
        ("file", json!({"target_branches": "file"})),
        ("environment", json!({"target_branches": "env"})),
        ("cli", json!({"target_branches": "cli"}))
    ],
    "target_branches",
    "cli",
    "CLI should win for target_branches"
)]
fn test_layer_precedence(
    #[case] layers: Vec<(&str, Value)>,
    #[case] field: &str,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let config = build_config_from_layers(&layers);

    let actual = match field {
        "skip_users" => config.skip_users.as_deref(),
        "github_token" => config.github_token.as_deref(),
        "require_assignee" => config.require_assignee.as_deref(),
        "target_branches" => config.target_branches.as_deref(),
        _ => panic!("unknown field: {field}"),
    };

    assert_eq!(actual, Some(expected), "{message}");
}

#[rstest]
fn defaults_are_none_when_no_sources_provided() {
    let config = build_config_from_layers(&[(
        "defaults",
        json!({"github_token": null, "skip_users": null}),
    )]);

    assert!(config.github_token.is_none(), "github_token should be None");
    assert!(config.skip_users.is_none(), "skip_users should be None");
    assert!(config.target_branches.is_none(), "target_branches should be None");
    assert!(config.close_pr_on_failure.is_none(), "close_pr_on_failure should be None");
}
