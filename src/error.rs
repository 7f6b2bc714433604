// src/error.rs
//! Application error types with structured error handling.
//!
//! Only the outer layers fail: configuration, the Jira fetch, and the
//! ticket store. Rendering and section merging are infallible and never
//! produce one of these.

use std::fmt;
use thiserror::Error;

/// Jira HTTP failures as a typed vocabulary.
///
/// Jira Cloud reports most failures through the status code alone, so the
/// variants are keyed on status rather than on an error-code string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JiraErrorCode {
    /// Credentials missing or rejected
    Unauthorized,
    /// Credentials valid but lacking permission
    Forbidden,
    /// The requested issue or resource does not exist
    NotFound,
    /// Too many requests, back off and retry
    RateLimited,
    /// Jira returned a 5xx
    ServerError(u16),
    /// Any other non-success status
    HttpStatus(u16),
}

impl JiraErrorCode {
    /// Classify a non-success HTTP status.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError(status),
            other => Self::HttpStatus(other),
        }
    }

    /// Whether the failure is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::ServerError(_))
    }

    /// Whether the failure means the credentials are wrong or insufficient.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Forbidden)
    }
}

impl fmt::Display for JiraErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::NotFound => write!(f, "not_found"),
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ServerError(code) => write!(f, "server_error_{}", code),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid configuration: {}", problems.join("; "))]
    InvalidConfiguration { problems: Vec<String> },

    #[error("Unauthorized: check your email and API token")]
    Unauthorized,

    #[error("Ticket {0} not found")]
    TicketNotFound(String),

    #[error("No local file for {0}; run 'jt pull {0}' first")]
    NoLocalTicket(String),

    #[error("Jira API error (HTTP {status}, {code}): {message}")]
    JiraService {
        code: JiraErrorCode,
        status: u16,
        message: String,
    },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(JiraErrorCode::from_http_status(401), JiraErrorCode::Unauthorized);
        assert_eq!(JiraErrorCode::from_http_status(404), JiraErrorCode::NotFound);
        assert_eq!(
            JiraErrorCode::from_http_status(503),
            JiraErrorCode::ServerError(503)
        );
        assert_eq!(
            JiraErrorCode::from_http_status(418),
            JiraErrorCode::HttpStatus(418)
        );
    }

    #[test]
    fn test_retryable_and_auth_predicates() {
        assert!(JiraErrorCode::RateLimited.is_retryable());
        assert!(JiraErrorCode::ServerError(502).is_retryable());
        assert!(!JiraErrorCode::NotFound.is_retryable());
        assert!(JiraErrorCode::Forbidden.is_auth_failure());
        assert!(!JiraErrorCode::HttpStatus(400).is_auth_failure());
    }

    #[test]
    fn test_invalid_configuration_joins_problems() {
        let err = AppError::InvalidConfiguration {
            problems: vec!["instance is required".into(), "email is required".into()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration: instance is required; email is required"
        );
    }
}
