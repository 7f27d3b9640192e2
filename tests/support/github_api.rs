//! Wiremock stubs for the GitHub endpoints the gate calls.
//!
//! Every stub targets the `octo/repo` repository.

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

pub const OWNER: &str = "octo";
pub const REPO: &str = "repo";

fn issue_json(number: u64, assignees: &[&str]) -> Value {
    json!({
        "number": number,
        "title": format!("Issue {number}"),
        "url": format!("https://github.com/{OWNER}/{REPO}/issues/{number}"),
        "assignees": { "edges": assignees
            .iter()
            .map(|login| json!({ "node": { "login": login } }))
            .collect::<Vec<_>>() }
    })
}

/// GraphQL closing references for pull request `pr`, answering with
/// `issues` (number, assignees).
pub fn closing_references(pr: u64, issues: &[(u64, &[&str])]) -> Mock {
    let edges: Vec<Value> = issues
        .iter()
        .map(|(number, assignees)| json!({ "node": issue_json(*number, assignees) }))
        .collect();
    let body = json!({
        "data": {
            "repository": {
                "pullRequest": {
                    "closingIssuesReferences": { "edges": edges }
                }
            }
        }
    });

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": { "owner": OWNER, "repo": REPO, "number": pr }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
}

/// GraphQL closing references answering with a query error.
pub fn closing_references_error() -> Mock {
    let body = json!({
        "data": null,
        "errors": [{ "message": "Could not resolve to a PullRequest" }]
    });

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
}

/// REST issue lookup.
pub fn issue(number: u64, assignees: &[&str]) -> Mock {
    let body = json!({
        "number": number,
        "title": format!("Issue {number}"),
        "assignees": assignees
            .iter()
            .map(|login| json!({ "login": login }))
            .collect::<Vec<_>>()
    });

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/issues/{number}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
}

/// REST repository lookup reporting `branch` as the default branch.
pub fn default_branch(branch: &str) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "full_name": format!("{OWNER}/{REPO}"),
                "default_branch": branch
            })),
        )
}

/// Comment creation on pull request `pr`, answering with `status`.
pub fn comments(pr: u64, status: u16) -> Mock {
    let response = if status == 201 {
        ResponseTemplate::new(201).set_body_json(json!({ "id": 1, "body": "" }))
    } else {
        ResponseTemplate::new(status).set_body_json(json!({ "message": "Resource not accessible" }))
    };

    Mock::given(method("POST"))
        .and(path(format!("/repos/{OWNER}/{REPO}/issues/{pr}/comments")))
        .respond_with(response)
}

/// Closing pull request `pr`.
pub fn close(pr: u64) -> Mock {
    Mock::given(method("PATCH"))
        .and(path(format!("/repos/{OWNER}/{REPO}/pulls/{pr}")))
        .and(body_partial_json(json!({ "state": "closed" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "number": pr, "state": "closed" })),
        )
}
