// src/formatting/issue.rs
//! Assembles the saved ticket document from a decoded issue.
//!
//! Layout, top to bottom: meta comment, title, metadata table, description,
//! subtasks, linked issues, comments. The user-owned notes section is never
//! produced here; the pull pipeline re-appends it.

use super::adf::render_optional;
use super::dates::format_date;
use crate::constants::{DONE_STATUSES, EMPTY_FIELD, META_TAG};
use crate::model::{Comment, Issue, IssueLink, IssueRef, Named, User};
use chrono::{DateTime, SecondsFormat, Utc};

/// Renders the full ticket document. Output ends with exactly one newline.
pub fn render_issue(issue: &Issue, fetched_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "<!-- {} ticket={} fetched={} -->\n",
        META_TAG,
        issue.key,
        fetched_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    out.push_str(&format!("# {}: {}\n\n", issue.key, issue.fields.summary));

    out.push_str(&render_metadata(issue));
    out.push_str(&render_description(issue));
    out.push_str(&render_subtasks(&issue.fields.subtasks));
    out.push_str(&render_links(&issue.fields.issue_links));
    if issue.comment_count() > 0 {
        out.push_str(&render_comment_section(issue));
    }

    log::debug!("Rendered {} into {} bytes", issue.key, out.len());
    finish(out)
}

/// Renders only the comments section, with a placeholder when there are none.
pub fn render_comments(issue: &Issue) -> String {
    if issue.comment_count() == 0 {
        return finish("## Comments (0)\n\n*No comments.*\n\n".to_string());
    }
    finish(render_comment_section(issue))
}

fn finish(mut out: String) -> String {
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}

fn render_metadata(issue: &Issue) -> String {
    let fields = &issue.fields;
    let mut rows: Vec<(&str, String)> = vec![
        ("Status", name_of(fields.status.as_ref())),
        ("Type", name_of(fields.issue_type.as_ref())),
        ("Priority", name_of(fields.priority.as_ref())),
        ("Assignee", user_of(fields.assignee.as_ref())),
        ("Reporter", user_of(fields.reporter.as_ref())),
    ];

    if let Some(sprint) = issue.sprint.as_ref().filter(|s| !s.name.is_empty()) {
        rows.push(("Sprint", sprint.name.clone()));
    }
    if let Some(epic) = &issue.epic {
        rows.push(("Epic", epic.label()));
    }
    if let Some(parent) = &fields.parent {
        rows.push(("Parent", parent.label()));
    }
    if !fields.labels.is_empty() {
        rows.push(("Labels", fields.labels.join(", ")));
    }
    rows.push(("Created", format_date(&fields.created)));
    rows.push(("Updated", format_date(&fields.updated)));

    let mut table = String::from("| Field | Value |\n|-------|-------|\n");
    for (field, value) in rows {
        let value = if value.is_empty() {
            EMPTY_FIELD
        } else {
            value.as_str()
        };
        table.push_str(&format!("| {} | {} |\n", field, value));
    }
    table.push('\n');
    table
}

fn name_of(named: Option<&Named>) -> String {
    named.map(|n| n.name.clone()).unwrap_or_default()
}

fn user_of(user: Option<&User>) -> String {
    user.map(|u| u.display().to_string()).unwrap_or_default()
}

fn render_description(issue: &Issue) -> String {
    let body = render_optional(issue.fields.description.as_ref());
    if body.is_empty() {
        "## Description\n\n*No description provided.*\n\n".to_string()
    } else {
        format!("## Description\n\n{}\n\n", body)
    }
}

fn render_subtasks(subtasks: &[IssueRef]) -> String {
    if subtasks.is_empty() {
        return String::new();
    }

    let mut out = String::from("## Subtasks\n\n");
    for subtask in subtasks {
        let status = subtask.status_name();
        let done = DONE_STATUSES
            .iter()
            .any(|s| s.eq_ignore_ascii_case(status));
        let check = if done { "x" } else { " " };
        out.push_str(&format!("- [{}] {}", check, subtask.label()));
        if !status.is_empty() {
            out.push_str(&format!(" ({})", status));
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

fn render_links(links: &[IssueLink]) -> String {
    if links.is_empty() {
        return String::new();
    }

    let mut out = String::from("## Linked Issues\n\n");
    for link in links {
        let Some(link_type) = &link.link_type else {
            continue;
        };
        if let Some(target) = &link.outward_issue {
            out.push_str(&format!("- {} {}\n", link_type.outward, target.label()));
        }
        if let Some(source) = &link.inward_issue {
            out.push_str(&format!("- {} {}\n", link_type.inward, source.label()));
        }
    }
    out.push('\n');
    out
}

fn render_comment_section(issue: &Issue) -> String {
    let mut out = format!("## Comments ({})\n\n", issue.comment_count());
    for comment in issue.comments() {
        out.push_str(&render_comment(comment));
    }
    out
}

fn render_comment(comment: &Comment) -> String {
    let author = comment
        .author
        .as_ref()
        .map(User::display)
        .filter(|name| !name.is_empty())
        .unwrap_or("Unknown");

    let mut out = format!("### {} -- {}\n\n", author, format_date(&comment.created));
    let body = render_optional(comment.body.as_ref());
    if !body.is_empty() {
        out.push_str(&body);
        out.push_str("\n\n");
    }
    out
}
