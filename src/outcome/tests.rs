//! Unit tests for failure handling and message rendering.

use mockall::predicate::{always, eq};
use rstest::{fixture, rstest};

use super::{FailureHandler, MessageCatalogue, MessageKind, MessageTemplateError, render_message};
use crate::config::{GateSettings, MessageTemplates};
use crate::github::{
    Author, GateError, Issue, MockPullRequestGateway, PersonalAccessToken, PullRequestContext,
    PullRequestLocator, PullRequestNumber, RepositoryLocator,
};
use crate::telemetry::{RecordingTelemetrySink, TelemetryEvent};
use crate::validation::{ValidationReason, ValidationResult};

#[fixture]
fn settings() -> GateSettings {
    let token = PersonalAccessToken::new("ghp_example").expect("token should be valid");
    GateSettings::new(token)
}

#[fixture]
fn pull_request() -> PullRequestContext {
    let repository =
        RepositoryLocator::from_owner_repo("octo", "repo").expect("repository should parse");
    let number = PullRequestNumber::new(7).expect("number should be valid");
    PullRequestContext {
        locator: PullRequestLocator::new(repository, number),
        author: Author {
            login: String::from("bob"),
            is_bot: false,
        },
        body: String::new(),
        base_branch: String::from("feature-x"),
    }
}

fn failure(reason: ValidationReason) -> ValidationResult {
    ValidationResult::fail(reason, None)
}

fn comment_failure() -> GateError {
    GateError::Api {
        message: String::from("comment rejected"),
    }
}

#[rstest]
#[case(ValidationReason::NotLinked, MessageKind::NoIssue)]
#[case(ValidationReason::NoIssueNoReference, MessageKind::NoIssue)]
#[case(ValidationReason::NoAssignee, MessageKind::NoAssignee)]
#[case(ValidationReason::AssigneeMismatch, MessageKind::NoAssignee)]
#[case(ValidationReason::BranchNotAllowed { allowed: Vec::new() }, MessageKind::InvalidBranch)]
#[case(ValidationReason::LinkageError, MessageKind::Fallback)]
#[case(ValidationReason::Unknown(String::from("odd")), MessageKind::Fallback)]
fn reasons_map_to_templates(#[case] reason: ValidationReason, #[case] expected: MessageKind) {
    assert_eq!(MessageKind::for_reason(&reason), expected);
}

#[rstest]
fn default_messages_render(settings: GateSettings, pull_request: PullRequestContext) {
    let catalogue = MessageCatalogue::new(&settings.messages);

    assert_eq!(
        catalogue.message_for(&pull_request, &failure(ValidationReason::NotLinked)),
        "This PR must be linked to an issue before it can be merged."
    );
    assert_eq!(
        catalogue.message_for(
            &pull_request,
            &failure(ValidationReason::BranchNotAllowed {
                allowed: vec![String::from("develop"), String::from("main")],
            })
        ),
        "This PR must target one of the allowed branches: develop, main."
    );
    assert_eq!(
        catalogue.message_for(&pull_request, &failure(ValidationReason::LinkageError)),
        "PR validation failed: Error checking issue linking"
    );
}

#[rstest]
fn templates_see_pull_request_variables(pull_request: PullRequestContext) {
    let result = ValidationResult::fail(
        ValidationReason::AssigneeMismatch,
        Some(Issue {
            number: 42,
            assignees: std::iter::once(String::from("alice")).collect(),
        }),
    );

    let rendered = render_message(
        "@{{ author }} on {{ branch }}: #{{ issue }} {{ reason }} ({{ description }})",
        &pull_request,
        &result,
    )
    .expect("template should render");

    assert_eq!(
        rendered,
        "@bob on feature-x: #42 assignee_mismatch (Assignee mismatch)"
    );
}

#[rstest]
fn invalid_template_is_reported(pull_request: PullRequestContext) {
    let error = render_message("{% if %}", &pull_request, &failure(ValidationReason::NotLinked))
        .expect_err("template should not parse");
    assert!(
        matches!(error, MessageTemplateError::InvalidSyntax { .. }),
        "expected InvalidSyntax, got {error:?}"
    );
}

#[rstest]
fn invalid_template_falls_back_to_raw_text(pull_request: PullRequestContext) {
    let templates = MessageTemplates {
        no_issue: String::from("Link an issue {{ please"),
        ..MessageTemplates::default()
    };

    let message = MessageCatalogue::new(&templates)
        .message_for(&pull_request, &failure(ValidationReason::NotLinked));

    assert_eq!(message, "Link an issue {{ please");
}

#[rstest]
#[tokio::test]
async fn comments_then_closes(settings: GateSettings, pull_request: PullRequestContext) {
    let mut sequence = mockall::Sequence::new();
    let mut gateway = MockPullRequestGateway::new();
    gateway
        .expect_post_comment()
        .with(
            always(),
            eq("The linked issue must be assigned to the PR author before this PR can be merged."),
        )
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_, _| Ok(()));
    gateway
        .expect_close_pull_request()
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_| Ok(()));
    let telemetry = RecordingTelemetrySink::default();

    let handled = FailureHandler::new(&settings, &gateway, &telemetry)
        .handle_failure(&pull_request, &failure(ValidationReason::NoAssignee))
        .await;

    assert!(handled);
    assert_eq!(
        telemetry.take(),
        vec![
            TelemetryEvent::CommentPosted {
                pull_request: String::from("octo/repo#7"),
            },
            TelemetryEvent::PullRequestClosed {
                pull_request: String::from("octo/repo#7"),
            },
        ]
    );
}

#[rstest]
#[tokio::test]
async fn close_is_attempted_when_comment_fails(
    settings: GateSettings,
    pull_request: PullRequestContext,
) {
    let mut gateway = MockPullRequestGateway::new();
    gateway
        .expect_post_comment()
        .times(1)
        .returning(|_, _| Err(comment_failure()));
    gateway
        .expect_close_pull_request()
        .times(1)
        .returning(|_| Ok(()));
    let telemetry = RecordingTelemetrySink::default();

    let handled = FailureHandler::new(&settings, &gateway, &telemetry)
        .handle_failure(&pull_request, &failure(ValidationReason::NotLinked))
        .await;

    assert!(!handled, "a failed comment should fail the handler");
    assert_eq!(
        telemetry.take(),
        vec![
            TelemetryEvent::CommentFailed {
                pull_request: String::from("octo/repo#7"),
                message: comment_failure().to_string(),
            },
            TelemetryEvent::PullRequestClosed {
                pull_request: String::from("octo/repo#7"),
            },
        ]
    );
}

#[rstest]
#[tokio::test]
async fn close_failure_fails_handler(settings: GateSettings, pull_request: PullRequestContext) {
    let mut gateway = MockPullRequestGateway::new();
    gateway
        .expect_post_comment()
        .times(1)
        .returning(|_, _| Ok(()));
    gateway.expect_close_pull_request().times(1).returning(|_| {
        Err(GateError::Authentication {
            message: String::from("forbidden"),
        })
    });
    let telemetry = RecordingTelemetrySink::default();

    let handled = FailureHandler::new(&settings, &gateway, &telemetry)
        .handle_failure(&pull_request, &failure(ValidationReason::NotLinked))
        .await;

    assert!(!handled);
}

#[rstest]
#[case::comment_succeeds(true)]
#[case::comment_fails(false)]
#[tokio::test]
async fn leaves_pull_request_open_when_closing_disabled(
    mut settings: GateSettings,
    pull_request: PullRequestContext,
    #[case] comment_succeeds: bool,
) {
    settings.close_on_failure = false;
    let mut gateway = MockPullRequestGateway::new();
    gateway
        .expect_post_comment()
        .times(1)
        .returning(move |_, _| {
            if comment_succeeds {
                Ok(())
            } else {
                Err(comment_failure())
            }
        });
    gateway.expect_close_pull_request().never();
    let telemetry = RecordingTelemetrySink::default();

    let handled = FailureHandler::new(&settings, &gateway, &telemetry)
        .handle_failure(&pull_request, &failure(ValidationReason::LinkageError))
        .await;

    assert_eq!(handled, comment_succeeds);
}
