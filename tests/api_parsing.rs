// tests/api_parsing.rs
//! Decoding of recorded Jira responses into issues and typed errors.

use jt::{
    parse_issue_response, parse_user_response, AppError, ApiResponse, Epic, JiraErrorCode,
    TicketKey,
};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;

const FULL_ISSUE: &str = include_str!("fixtures/issue_full.json");
const MINIMAL_ISSUE: &str = include_str!("fixtures/issue_minimal.json");

fn response(status: StatusCode, body: &str) -> ApiResponse<String> {
    ApiResponse {
        data: body.to_string(),
        status,
        url: "https://myorg.atlassian.net/rest/api/3/issue/PROJ-123?expand=names".to_string(),
    }
}

fn key(input: &str) -> TicketKey {
    TicketKey::parse(input).unwrap()
}

#[test]
fn test_full_issue_standard_fields() {
    let issue = parse_issue_response(response(StatusCode::OK, FULL_ISSUE), &key("PROJ-123"))
        .expect("fixture should parse");

    assert_eq!(issue.key, "PROJ-123");
    assert_eq!(issue.fields.summary, "Fix login timeout");
    assert_eq!(issue.fields.status.as_ref().unwrap().name, "In Progress");
    assert_eq!(issue.fields.issue_type.as_ref().unwrap().name, "Bug");
    assert_eq!(issue.fields.priority.as_ref().unwrap().name, "High");
    assert_eq!(issue.fields.assignee.as_ref().unwrap().display(), "Alice Smith");
    assert_eq!(issue.fields.reporter.as_ref().unwrap().display(), "bob@example.com");
    assert_eq!(issue.fields.labels, vec!["backend", "auth"]);
    assert_eq!(issue.fields.parent.as_ref().unwrap().label(), "PROJ-100: Auth hardening");
    assert_eq!(issue.fields.subtasks.len(), 2);
    assert_eq!(issue.fields.subtasks[0].status_name(), "Done");
    assert_eq!(issue.fields.issue_links.len(), 2);
    assert!(issue.fields.description.is_some());
}

#[test]
fn test_full_issue_custom_fields_found_by_name() {
    let issue =
        parse_issue_response(response(StatusCode::OK, FULL_ISSUE), &key("PROJ-123")).unwrap();

    let sprint = issue.sprint.expect("sprint should be extracted");
    assert_eq!(sprint.name, "Sprint 5");
    assert_eq!(sprint.state, "active");
    assert_eq!(
        issue.epic,
        Some(Epic {
            key: "PROJ-80".to_string(),
            summary: String::new(),
        })
    );
}

#[test]
fn test_full_issue_comments() {
    let issue =
        parse_issue_response(response(StatusCode::OK, FULL_ISSUE), &key("PROJ-123")).unwrap();

    assert_eq!(issue.comment_count(), 2);
    let comments = issue.comments();
    assert_eq!(comments[0].author.as_ref().unwrap().display_name, "Alice Smith");
    assert!(comments[1].author.is_none());
    assert_eq!(comments[1].created, "2024-01-16T09:15:00.000+0000");
}

#[test]
fn test_minimal_issue() {
    let issue =
        parse_issue_response(response(StatusCode::OK, MINIMAL_ISSUE), &key("PROJ-9")).unwrap();

    assert_eq!(issue.key, "PROJ-9");
    assert_eq!(issue.fields.summary, "Tidy README");
    assert!(issue.fields.description.is_none());
    assert!(issue.fields.assignee.is_none());
    assert_eq!(issue.comment_count(), 0);
    assert!(issue.sprint.is_none());
    assert!(issue.epic.is_none());
}

#[test]
fn test_issue_without_fields_object() {
    let issue = parse_issue_response(
        response(StatusCode::OK, r#"{"key": "PROJ-5"}"#),
        &key("PROJ-5"),
    )
    .unwrap();
    assert_eq!(issue.key, "PROJ-5");
    assert_eq!(issue.fields.summary, "");
}

#[test]
fn test_not_found_names_the_ticket() {
    let body = r#"{"errorMessages":["Issue does not exist or you do not have permission to see it."],"errors":{}}"#;
    let err = parse_issue_response(response(StatusCode::NOT_FOUND, body), &key("PROJ-404"))
        .unwrap_err();

    assert!(matches!(err, AppError::TicketNotFound(ref k) if k == "PROJ-404"));
}

#[test]
fn test_auth_failures() {
    for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
        let err = parse_issue_response(response(status, ""), &key("PROJ-1")).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized), "{status}: {err:?}");
    }
}

#[test]
fn test_server_error_is_retryable() {
    let err = parse_issue_response(
        response(StatusCode::SERVICE_UNAVAILABLE, "  maintenance  "),
        &key("PROJ-1"),
    )
    .unwrap_err();

    match err {
        AppError::JiraService { code, status, message } => {
            assert_eq!(code, JiraErrorCode::ServerError(503));
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
            assert!(code.is_retryable());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_invalid_json_is_malformed() {
    let err = parse_issue_response(response(StatusCode::OK, "<html>login</html>"), &key("PROJ-1"))
        .unwrap_err();
    assert!(matches!(err, AppError::MalformedResponse(_)));
}

#[test]
fn test_user_response() {
    let body = r#"{
        "accountId": "5b10a2844c20165700ede21g",
        "displayName": "Alice Smith",
        "emailAddress": "alice@example.com",
        "active": true,
        "timeZone": "Europe/Berlin"
    }"#;
    let user = parse_user_response(response(StatusCode::OK, body)).unwrap();

    assert_eq!(user.account_id, "5b10a2844c20165700ede21g");
    assert_eq!(user.display_name, "Alice Smith");
    assert_eq!(user.email, "alice@example.com");
    assert!(user.active);
    assert_eq!(user.time_zone, "Europe/Berlin");
}

#[test]
fn test_user_response_unauthorized() {
    let err = parse_user_response(response(StatusCode::UNAUTHORIZED, "")).unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
}
