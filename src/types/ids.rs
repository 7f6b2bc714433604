use super::ValidationError;
use crate::constants::TICKET_FILE_EXTENSION;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static::lazy_static! {
    static ref TICKET_KEY_REGEX: Regex = Regex::new(r"^[A-Z][A-Z0-9_]*-[0-9]+$")
        .expect("Failed to compile ticket key regex - this is a bug in the code");
}

/// A normalized Jira issue key such as `PROJ-123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TicketKey(String);

impl TicketKey {
    /// Parse a key, trimming whitespace and upper-casing it.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(ValidationError::EmptyField("ticket key"));
        }
        if !TICKET_KEY_REGEX.is_match(&normalized) {
            return Err(ValidationError::InvalidTicketKey {
                input: input.to_string(),
                reason: "expected PROJECT-NUMBER, e.g. PROJ-123".to_string(),
            });
        }
        Ok(Self(normalized))
    }

    /// Parse a key, allowing a bare issue number when a default project is set.
    ///
    /// `123` with default project `proj` resolves to `PROJ-123`.
    pub fn resolve(input: &str, default_project: Option<&str>) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let is_bare_number = !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit());

        match default_project.map(str::trim).filter(|p| !p.is_empty()) {
            Some(project) if is_bare_number => Self::parse(&format!("{}-{}", project, trimmed)),
            _ => Self::parse(trimmed),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the saved ticket document.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, TICKET_FILE_EXTENSION)
    }
}

impl fmt::Display for TicketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TicketKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TicketKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TicketKey::parse(&s).map_err(serde::de::Error::custom)
    }
}
