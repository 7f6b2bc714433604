// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use std::fmt;
use url::Url;

/// API token used for Jira basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Create a new token, rejecting empty or whitespace-only input.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(ValidationError::EmptyField("API token"));
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First four characters followed by one `*` per remaining character.
    pub fn masked(&self) -> String {
        let visible: String = self.0.chars().take(4).collect();
        let hidden = self.0.chars().count().saturating_sub(4);
        if hidden == 0 {
            return "****".to_string();
        }
        format!("{}{}", visible, "*".repeat(hidden))
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken({})", self.masked())
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact token in display
        write!(f, "{}", self.masked())
    }
}

/// Base URL of a Jira Cloud instance, always `https://` and without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceUrl(String);

impl InstanceUrl {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField("instance"));
        }
        if !trimmed.starts_with("https://") {
            return Err(ValidationError::InvalidUrl {
                url: input.to_string(),
                reason: "instance must start with https://".to_string(),
            });
        }
        let parsed = Url::parse(trimmed).map_err(|e| ValidationError::InvalidUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.host_str().is_none() {
            return Err(ValidationError::InvalidUrl {
                url: input.to_string(),
                reason: "missing host".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins an API path (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

impl fmt::Display for InstanceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
