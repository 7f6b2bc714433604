//! Decoded Jira issue records, shaped after the REST v3 JSON.

use super::adf::Document;
use serde::{Deserialize, Serialize};

/// A Jira user as embedded in issues, or returned by `/myself`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, rename = "emailAddress")]
    pub email: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub time_zone: String,
}

impl User {
    pub fn named(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            ..Default::default()
        }
    }

    /// Display name, falling back to the email address.
    pub fn display(&self) -> &str {
        if self.display_name.is_empty() {
            &self.email
        } else {
            &self.display_name
        }
    }
}

/// A `{ "name": ... }` reference, used for status, issue type and priority.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Named {
    #[serde(default)]
    pub name: String,
}

impl Named {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// A single comment with its rich-text body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default)]
    pub body: Option<Document>,
    #[serde(default)]
    pub created: String,
}

/// The `comment` field of an issue.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommentPage {
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub total: usize,
}

impl CommentPage {
    pub fn new(comments: Vec<Comment>) -> Self {
        let total = comments.len();
        Self { comments, total }
    }

    /// Number of comments to report: the server total, or the number
    /// actually returned when that is larger.
    pub fn count(&self) -> usize {
        self.total.max(self.comments.len())
    }
}

/// Summary-only fields of a referenced issue.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IssueSummary {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub status: Option<Named>,
}

/// A key plus summary fields: subtasks, link targets and the parent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IssueRef {
    pub key: String,
    #[serde(default)]
    pub fields: IssueSummary,
}

impl IssueRef {
    pub fn new(key: &str, summary: &str) -> Self {
        Self {
            key: key.to_string(),
            fields: IssueSummary {
                summary: summary.to_string(),
                status: None,
            },
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.fields.status = Some(Named::new(status));
        self
    }

    pub fn status_name(&self) -> &str {
        self.fields.status.as_ref().map(|s| s.name.as_str()).unwrap_or("")
    }

    /// `KEY` or `KEY: summary`.
    pub fn label(&self) -> String {
        if self.fields.summary.is_empty() {
            self.key.clone()
        } else {
            format!("{}: {}", self.key, self.fields.summary)
        }
    }
}

/// Relation verbs of an issue link type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinkType {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inward: String,
    #[serde(default)]
    pub outward: String,
}

/// One issue link; exactly one direction is normally present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLink {
    #[serde(default, rename = "type")]
    pub link_type: Option<LinkType>,
    #[serde(default)]
    pub inward_issue: Option<IssueRef>,
    #[serde(default)]
    pub outward_issue: Option<IssueRef>,
}

/// The standard (non-custom) fields of an issue.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub status: Option<Named>,
    #[serde(default, rename = "issuetype")]
    pub issue_type: Option<Named>,
    #[serde(default)]
    pub priority: Option<Named>,
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default)]
    pub reporter: Option<User>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub description: Option<Document>,
    #[serde(default)]
    pub comment: Option<CommentPage>,
    #[serde(default)]
    pub subtasks: Vec<IssueRef>,
    #[serde(default, rename = "issuelinks")]
    pub issue_links: Vec<IssueLink>,
    #[serde(default)]
    pub parent: Option<IssueRef>,
}

/// Sprint custom field value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sprint {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
}

/// Epic Link custom field value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Epic {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub summary: String,
}

impl Epic {
    /// `KEY` or `KEY: summary`.
    pub fn label(&self) -> String {
        if self.summary.is_empty() {
            self.key.clone()
        } else {
            format!("{}: {}", self.key, self.summary)
        }
    }
}

/// A fully decoded issue: standard fields plus the extracted custom fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
    #[serde(default)]
    pub sprint: Option<Sprint>,
    #[serde(default)]
    pub epic: Option<Epic>,
}

impl Issue {
    pub fn new(key: &str, summary: &str) -> Self {
        Self {
            key: key.to_string(),
            fields: IssueFields {
                summary: summary.to_string(),
                ..Default::default()
            },
            sprint: None,
            epic: None,
        }
    }

    pub fn comments(&self) -> &[Comment] {
        self.fields
            .comment
            .as_ref()
            .map(|page| page.comments.as_slice())
            .unwrap_or(&[])
    }

    pub fn comment_count(&self) -> usize {
        self.fields.comment.as_ref().map(CommentPage::count).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_display_falls_back_to_email() {
        let user = User {
            email: "a@example.com".into(),
            ..Default::default()
        };
        assert_eq!(user.display(), "a@example.com");
        assert_eq!(User::named("Alice").display(), "Alice");
    }

    #[test]
    fn test_comment_count_prefers_larger() {
        let page = CommentPage {
            comments: vec![Comment::default()],
            total: 5,
        };
        assert_eq!(page.count(), 5);
        let page = CommentPage {
            comments: vec![Comment::default(), Comment::default()],
            total: 0,
        };
        assert_eq!(page.count(), 2);
    }

    #[test]
    fn test_decode_fields_with_jira_names() {
        let fields: IssueFields = serde_json::from_str(
            r#"{
                "summary": "S",
                "issuetype": {"name": "Bug"},
                "issuelinks": [{
                    "type": {"name": "Blocks", "inward": "is blocked by", "outward": "blocks"},
                    "outwardIssue": {"key": "P-2", "fields": {"summary": "Other"}}
                }],
                "assignee": {"displayName": "Alice", "emailAddress": "alice@example.com"},
                "description": null
            }"#,
        )
        .unwrap();
        assert_eq!(fields.issue_type, Some(Named::new("Bug")));
        assert_eq!(fields.issue_links.len(), 1);
        let link = &fields.issue_links[0];
        assert_eq!(link.outward_issue.as_ref().unwrap().key, "P-2");
        assert_eq!(fields.assignee.unwrap().email, "alice@example.com");
        assert!(fields.description.is_none());
    }

    #[test]
    fn test_labels() {
        assert_eq!(IssueRef::new("P-1", "").label(), "P-1");
        assert_eq!(IssueRef::new("P-1", "Parent").label(), "P-1: Parent");
        let epic = Epic {
            key: "P-80".into(),
            summary: "Auth".into(),
        };
        assert_eq!(epic.label(), "P-80: Auth");
    }
}
