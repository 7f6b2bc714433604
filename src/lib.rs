// src/lib.rs
//! jt library: fetches Jira issues and keeps them as local markdown files.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `JiraErrorCode`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `Settings`, `ResolvedConfig`
//! - **Domain model**: `Document`, `Node`, `Mark`, `Issue` and friends
//! - **Domain types**: `TicketKey`, `ApiToken`, `InstanceUrl`
//! - **API client**: `IssueRepository`, `JiraHttpClient`, parsers
//! - **Formatting**: `render_document`, `render_issue`, `render_comments`
//! - **Store**: `TicketStore`, `extract_reserved_section`, `replace_section`
//! - **Pipeline**: `pull_ticket`, `PullRequest`, `PullOutcome`

mod api;
mod config;
pub mod constants;
mod error;
mod formatting;
mod model;
mod output;
mod pipeline;
mod store;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, JiraErrorCode, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{
    expand_home, home_dir, resolve_token, AuthCommand, Command, CommandLineInput, ConfigCommand,
    ConfigPaths, ResolvedConfig, Settings,
};

// --- Domain Model ---
pub use crate::model::{
    AttrValue, Attrs, Comment, CommentPage, Document, Epic, Issue, IssueFields, IssueLink,
    IssueRef, IssueSummary, LinkType, Mark, MarkKind, Named, Node, NodeKind, Sprint, User,
};

// --- Domain Types ---
pub use crate::types::{ApiToken, InstanceUrl, TicketKey};

// --- API Client ---
pub use crate::api::{
    extract_custom_fields,
    parser::{parse_issue_response, parse_user_response},
    parse_epic, parse_sprint, ApiResponse, CustomFields, IssueRepository, JiraHttpClient,
};

// --- Formatting ---
pub use crate::formatting::adf::{apply_marks, render_inline, render_inline_nodes};
pub use crate::formatting::{
    format_date, render_comments, render_document, render_issue, render_optional,
    MarkdownNodeRenderer, NodeRenderer,
};

// --- Store ---
pub use crate::store::{
    append_reserved_section, extract_reserved_section, replace_section, TicketStore,
};

// --- Output ---
pub use crate::output::{ChangeLine, ChangePreview};

// --- Pipeline ---
pub use crate::pipeline::{pull_ticket, PullOutcome, PullRequest};
