//! Tests for resolving raw inputs into [`GateSettings`](crate::GateSettings).

use rstest::rstest;

use super::helpers::config_with_token;
use crate::config::{LinkStrategyKind, MessageTemplates, parse_flag, parse_list};
use crate::github::GateError;
use crate::GateConfig;

#[rstest]
fn defaults_match_the_action() {
    let settings = config_with_token().settings().expect("settings should resolve");

    assert!(settings.skip_users.is_empty(), "no users skipped by default");
    assert!(settings.target_branches.is_empty(), "no branch restriction by default");
    assert!(!settings.require_assignee, "assignee not required by default");
    assert!(settings.close_on_failure, "close on failure by default");
    assert!(!settings.check_issue_reference, "fallback disabled by default");
    assert_eq!(settings.link_strategies, vec![LinkStrategyKind::ClosingReferences]);
    assert_eq!(settings.messages, MessageTemplates::default());
    assert_eq!(
        settings.messages.no_issue,
        "This PR must be linked to an issue before it can be merged."
    );
}

#[rstest]
fn settings_require_a_token() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
    let result = GateConfig::default().settings();

    assert_eq!(result, Err(GateError::MissingToken));
}

#[rstest]
fn skip_users_are_split_on_commas() {
    let config = GateConfig {
        skip_users: Some("user1, user2,, user3 ".to_owned()),
        ..config_with_token()
    };

    let settings = config.settings().expect("settings should resolve");
    assert!(settings.is_skipped("user1"));
    assert!(settings.is_skipped("user3"));
    assert_eq!(settings.skip_users.len(), 3);
}

#[rstest]
fn target_branches_keep_their_order() {
    let config = GateConfig {
        target_branches: Some("develop\n  release \n\nhotfix".to_owned()),
        ..config_with_token()
    };

    let settings = config.settings().expect("settings should resolve");
    assert_eq!(settings.target_branches, vec!["develop", "release", "hotfix"]);
}

#[rstest]
fn target_branches_keep_commas_in_names() {
    let config = GateConfig {
        target_branches: Some("release,2024\nmain".to_owned()),
        ..config_with_token()
    };

    let settings = config.settings().expect("settings should resolve");
    assert_eq!(settings.target_branches, vec!["release,2024", "main"]);
}

#[rstest]
fn boolean_inputs_are_parsed() {
    let config = GateConfig {
        require_assignee: Some("true".to_owned()),
        close_pr_on_failure: Some("false".to_owned()),
        check_issue_reference: Some("YES".to_owned()),
        ..config_with_token()
    };

    let settings = config.settings().expect("settings should resolve");
    assert!(settings.require_assignee);
    assert!(!settings.close_on_failure);
    assert!(settings.check_issue_reference);
}

#[rstest]
fn blank_toggle_keeps_the_default() {
    let config = GateConfig {
        close_pr_on_failure: Some("  ".to_owned()),
        ..config_with_token()
    };

    let settings = config.settings().expect("settings should resolve");
    assert!(settings.close_on_failure, "blank input should not disable closing");
}

#[rstest]
fn custom_messages_override_defaults() {
    let config = GateConfig {
        no_issue_message: Some("Custom no issue message".to_owned()),
        assignee_mismatch_message: Some("Custom assignee message".to_owned()),
        ..config_with_token()
    };

    let settings = config.settings().expect("settings should resolve");
    assert_eq!(settings.messages.no_issue, "Custom no issue message");
    assert_eq!(
        settings.messages.no_assignee, "Custom assignee message",
        "legacy assignee_mismatch_message should be honoured"
    );
}

#[rstest]
fn no_assignee_message_wins_over_legacy_name() {
    let config = GateConfig {
        no_assignee_message: Some("new".to_owned()),
        assignee_mismatch_message: Some("legacy".to_owned()),
        ..config_with_token()
    };

    let settings = config.settings().expect("settings should resolve");
    assert_eq!(settings.messages.no_assignee, "new");
}

#[rstest]
fn link_strategies_are_parsed_in_order_without_duplicates() {
    let config = GateConfig {
        link_strategies: Some("keyword_scan, closing-references\nkeyword-scan".to_owned()),
        ..config_with_token()
    };

    let settings = config.settings().expect("settings should resolve");
    assert_eq!(
        settings.link_strategies,
        vec![LinkStrategyKind::KeywordScan, LinkStrategyKind::ClosingReferences]
    );
}

#[rstest]
fn unknown_link_strategy_is_a_configuration_error() {
    let config = GateConfig {
        link_strategies: Some("closing-references, telepathy".to_owned()),
        ..config_with_token()
    };

    assert!(
        matches!(config.settings(), Err(GateError::Configuration { message }) if message.contains("telepathy")),
        "expected Configuration error naming the strategy"
    );
}

#[rstest]
#[case("true", true)]
#[case("1", true)]
#[case("Yes", true)]
#[case("ON", true)]
#[case("false", false)]
#[case("0", false)]
#[case("maybe", false)]
fn parses_flags(#[case] input: &str, #[case] expected: bool) {
    assert_eq!(parse_flag(input), expected, "input {input:?}");
}

#[rstest]
fn parse_list_drops_blank_entries() {
    assert_eq!(parse_list(" a ,, b,", &[',']), vec!["a", "b"]);
    assert!(parse_list("", &[',']).is_empty());
}
