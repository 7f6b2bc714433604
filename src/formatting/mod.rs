// src/formatting/mod.rs
//! Renders Jira data structures into markdown.

pub mod adf;
mod dates;
mod issue;

// --- Document conversion ---
pub use self::adf::{render_document, render_optional, MarkdownNodeRenderer, NodeRenderer};

// --- Ticket rendering ---
pub use self::dates::format_date;
pub use self::issue::{render_comments, render_issue};
