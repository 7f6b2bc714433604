// src/api/client.rs
//! Blocking HTTP client for the Jira Cloud REST API.
//!
//! Handles authentication and transport only. Status handling and decoding
//! live in the parser so they can be tested on fixture bodies.

use super::parser;
use super::IssueRepository;
use crate::constants::{ISSUE_EXPAND_NAMES, ISSUE_PATH, MYSELF_PATH, REQUEST_TIMEOUT};
use crate::error::AppError;
use crate::model::{Issue, User};
use crate::types::{ApiToken, InstanceUrl, TicketKey};
use reqwest::blocking::{Client, Response};
use reqwest::header;

/// An authenticated Jira client using basic auth (email + API token).
#[derive(Debug, Clone)]
pub struct JiraHttpClient {
    client: Client,
    base_url: InstanceUrl,
    email: String,
    token: ApiToken,
}

impl JiraHttpClient {
    pub fn new(base_url: InstanceUrl, email: &str, token: ApiToken) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url,
            email: email.to_string(),
            token,
        })
    }

    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    /// Makes an authenticated GET request. `path` starts with `/` and may
    /// carry a query string.
    pub fn get(&self, path: &str) -> Result<ApiResponse<String>, AppError> {
        let url = self.base_url.endpoint(path);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.email, Some(self.token.as_str()))
            .send()?;

        log::debug!("{} -> {}", url, response.status());
        extract_response_text(response)
    }
}

impl IssueRepository for JiraHttpClient {
    fn fetch_issue(&self, key: &TicketKey) -> Result<Issue, AppError> {
        let path = format!("{}{}?{}", ISSUE_PATH, key, ISSUE_EXPAND_NAMES);
        let result = self.get(&path)?;
        parser::parse_issue_response(result, key)
    }

    fn current_user(&self) -> Result<User, AppError> {
        let result = self.get(MYSELF_PATH)?;
        parser::parse_user_response(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Reads the whole body as text, keeping status and URL for error reporting.
pub fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text()?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
