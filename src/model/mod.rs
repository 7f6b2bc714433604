//! Domain model: the rich-text document tree and the issue record that
//! carries it.

pub mod adf;
pub mod issue;

pub use adf::{AttrValue, Attrs, Document, Mark, MarkKind, Node, NodeKind};
pub use issue::{
    Comment, CommentPage, Epic, Issue, IssueFields, IssueLink, IssueRef, IssueSummary, LinkType,
    Named, Sprint, User,
};
