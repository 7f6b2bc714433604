// src/api/parser.rs
//! Turns raw Jira responses into domain records or typed errors.

use super::client::ApiResponse;
use super::custom_fields::extract_custom_fields;
use crate::error::{AppError, JiraErrorCode};
use crate::model::{Issue, IssueFields, User};
use crate::types::TicketKey;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// First decoding pass: the issue envelope with `fields` left untyped so
/// custom fields can be looked up by id afterwards.
#[derive(Debug, Deserialize)]
struct RawIssue {
    key: String,
    #[serde(default)]
    fields: Value,
    #[serde(default)]
    names: BTreeMap<String, Value>,
}

/// Parses `GET /issue/<KEY>?expand=names`.
pub fn parse_issue_response(
    result: ApiResponse<String>,
    requested: &TicketKey,
) -> Result<Issue, AppError> {
    if !result.status.is_success() {
        return Err(error_for_status(result.status, &result.data, Some(requested)));
    }

    let raw: RawIssue = decode(&result.data, &result.url)?;
    let fields: IssueFields = if raw.fields.is_null() {
        IssueFields::default()
    } else {
        IssueFields::deserialize(&raw.fields).map_err(|e| {
            log::error!("Failed to decode fields of {}: {}", raw.key, e);
            AppError::MalformedResponse(format!("issue fields of {}: {}", raw.key, e))
        })?
    };
    let custom = extract_custom_fields(&raw.fields, &raw.names);

    Ok(Issue {
        key: raw.key,
        fields,
        sprint: custom.sprint,
        epic: custom.epic,
    })
}

/// Parses `GET /myself`.
pub fn parse_user_response(result: ApiResponse<String>) -> Result<User, AppError> {
    if !result.status.is_success() {
        return Err(error_for_status(result.status, &result.data, None));
    }
    decode(&result.data, &result.url)
}

fn decode<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} ({})", e, preview(body)))
    })
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(200) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Maps a non-success status to an error. A 404 is only a missing ticket
/// when a ticket was requested.
fn error_for_status(status: StatusCode, body: &str, ticket: Option<&TicketKey>) -> AppError {
    let code = JiraErrorCode::from_http_status(status.as_u16());
    if code.is_auth_failure() {
        return AppError::Unauthorized;
    }
    if let (JiraErrorCode::NotFound, Some(key)) = (&code, ticket) {
        return AppError::TicketNotFound(key.to_string());
    }

    let message = body.trim();
    AppError::JiraService {
        code,
        status: status.as_u16(),
        message: if message.is_empty() {
            status.to_string()
        } else {
            message.to_string()
        },
    }
}
