// src/api/mod.rs
//! Jira API interaction: the ability to retrieve issues from an instance.
//!
//! Transport, response parsing and custom-field extraction are kept
//! apart so everything but the socket can be tested offline.

pub mod client;
mod custom_fields;
pub mod parser;

use crate::error::AppError;
use crate::model::{Issue, User};
use crate::types::TicketKey;

/// The ability to retrieve issues from a Jira instance.
///
/// The pull pipeline depends on this trait, never on HTTP details.
pub trait IssueRepository {
    /// Fetches one issue with its comments and custom fields decoded.
    fn fetch_issue(&self, key: &TicketKey) -> Result<Issue, AppError>;

    /// The authenticated user; used to verify credentials.
    fn current_user(&self) -> Result<User, AppError>;
}

// Re-export the public interface
pub use client::{ApiResponse, JiraHttpClient};
pub use custom_fields::{extract_custom_fields, parse_epic, parse_sprint, CustomFields};
