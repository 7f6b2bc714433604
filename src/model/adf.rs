//! Atlassian Document Format: the rich-text tree Jira uses for issue
//! descriptions and comment bodies.
//!
//! The node vocabulary is open. Types this crate does not know about are
//! kept as [`NodeKind::Unknown`] with their children and text intact, so the
//! renderer can fall back to them instead of failing.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Root of a rich-text tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type", default = "doc_type")]
    pub doc_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<Node>,
}

fn doc_type() -> String {
    "doc".to_string()
}

impl Document {
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            doc_type: doc_type(),
            version: Some(1),
            content,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Node types the renderer understands, plus a catch-all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Paragraph,
    Heading,
    BulletList,
    OrderedList,
    ListItem,
    CodeBlock,
    Blockquote,
    Panel,
    Table,
    TableRow,
    TableHeader,
    TableCell,
    Rule,
    MediaSingle,
    MediaGroup,
    Text,
    Mention,
    Emoji,
    HardBreak,
    InlineCard,
    /// Anything else, with the raw type tag preserved.
    Unknown(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::BulletList => "bulletList",
            Self::OrderedList => "orderedList",
            Self::ListItem => "listItem",
            Self::CodeBlock => "codeBlock",
            Self::Blockquote => "blockquote",
            Self::Panel => "panel",
            Self::Table => "table",
            Self::TableRow => "tableRow",
            Self::TableHeader => "tableHeader",
            Self::TableCell => "tableCell",
            Self::Rule => "rule",
            Self::MediaSingle => "mediaSingle",
            Self::MediaGroup => "mediaGroup",
            Self::Text => "text",
            Self::Mention => "mention",
            Self::Emoji => "emoji",
            Self::HardBreak => "hardBreak",
            Self::InlineCard => "inlineCard",
            Self::Unknown(tag) => tag,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::BulletList | Self::OrderedList)
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        match tag {
            "paragraph" => Self::Paragraph,
            "heading" => Self::Heading,
            "bulletList" => Self::BulletList,
            "orderedList" => Self::OrderedList,
            "listItem" => Self::ListItem,
            "codeBlock" => Self::CodeBlock,
            "blockquote" => Self::Blockquote,
            "panel" => Self::Panel,
            "table" => Self::Table,
            "tableRow" => Self::TableRow,
            "tableHeader" => Self::TableHeader,
            "tableCell" => Self::TableCell,
            "rule" => Self::Rule,
            "mediaSingle" => Self::MediaSingle,
            "mediaGroup" => Self::MediaGroup,
            "text" => Self::Text,
            "mention" => Self::Mention,
            "emoji" => Self::Emoji,
            "hardBreak" => Self::HardBreak,
            "inlineCard" => Self::InlineCard,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

/// Inline decorations the renderer understands, plus a catch-all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MarkKind {
    Strong,
    Em,
    Code,
    Strike,
    Link,
    Unknown(String),
}

impl MarkKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Strong => "strong",
            Self::Em => "em",
            Self::Code => "code",
            Self::Strike => "strike",
            Self::Link => "link",
            Self::Unknown(tag) => tag,
        }
    }
}

impl From<String> for MarkKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "strong" => Self::Strong,
            "em" => Self::Em,
            "code" => Self::Code,
            "strike" => Self::Strike,
            "link" => Self::Link,
            _ => Self::Unknown(tag),
        }
    }
}

impl From<MarkKind> for String {
    fn from(kind: MarkKind) -> Self {
        kind.as_str().to_string()
    }
}

impl Default for MarkKind {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

/// A single attribute value. Jira sends strings and numbers for the
/// attributes this crate reads; anything else is kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Other(serde_json::Value),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

/// Node or mark attributes with permissive typed lookups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attrs(BTreeMap<String, AttrValue>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// The attribute as a string, `None` when absent or not a string.
    pub fn str(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(AttrValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// The attribute as a string, empty when absent or not a string.
    pub fn str_or_empty(&self, key: &str) -> &str {
        self.str(key).unwrap_or("")
    }

    /// The attribute as an integer. Fractional numbers are truncated.
    pub fn int(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(AttrValue::Int(n)) => Some(*n),
            Some(AttrValue::Other(v)) => v.as_f64().map(|f| f as i64),
            _ => None,
        }
    }

    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        self.int(key).unwrap_or(default)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Inline style or decoration applied to a text node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type", default)]
    pub kind: MarkKind,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Attrs::is_empty"
    )]
    pub attrs: Attrs,
}

impl Mark {
    pub fn new(kind: MarkKind) -> Self {
        Self {
            kind,
            attrs: Attrs::new(),
        }
    }

    pub fn strong() -> Self {
        Self::new(MarkKind::Strong)
    }

    pub fn em() -> Self {
        Self::new(MarkKind::Em)
    }

    pub fn code() -> Self {
        Self::new(MarkKind::Code)
    }

    pub fn strike() -> Self {
        Self::new(MarkKind::Strike)
    }

    pub fn link(href: &str) -> Self {
        let mut mark = Self::new(MarkKind::Link);
        mark.attrs.insert("href", href);
        mark
    }
}

/// A typed tree element: block container, inline leaf, or both.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub content: Vec<Node>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub marks: Vec<Mark>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Attrs::is_empty"
    )]
    pub attrs: Attrs,
}

impl Node {
    pub fn new(kind: impl Into<NodeKind>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// A plain `text` node.
    pub fn text(text: &str) -> Self {
        Self::new(NodeKind::Text).with_text(text)
    }

    /// A `paragraph` holding one plain text node.
    pub fn paragraph(text: &str) -> Self {
        Self::new(NodeKind::Paragraph).with_content(vec![Self::text(text)])
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_content(mut self, content: Vec<Node>) -> Self {
        self.content = content;
        self
    }

    pub fn with_marks(mut self, marks: Vec<Mark>) -> Self {
        self.marks = marks;
        self
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    /// The inline text payload, empty when absent.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn has_children(&self) -> bool {
        !self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_is_preserved() {
        let node: Node = serde_json::from_str(
            r#"{"type":"expand","content":[{"type":"paragraph","content":[{"type":"text","text":"x"}]}]}"#,
        )
        .unwrap();
        assert_eq!(node.kind, NodeKind::Unknown("expand".to_string()));
        assert_eq!(node.content.len(), 1);
        assert_eq!(node.content[0].kind, NodeKind::Paragraph);
    }

    #[test]
    fn test_attr_lookups_are_permissive() {
        let node: Node = serde_json::from_str(
            r#"{"type":"heading","attrs":{"level":3,"localId":null,"ratio":2.0,"name":"x"}}"#,
        )
        .unwrap();
        assert_eq!(node.attrs.int("level"), Some(3));
        assert_eq!(node.attrs.int("ratio"), Some(2));
        assert_eq!(node.attrs.int("name"), None);
        assert_eq!(node.attrs.int_or("missing", 1), 1);
        assert_eq!(node.attrs.str("level"), None);
        assert_eq!(node.attrs.str_or_empty("name"), "x");
        assert_eq!(node.attrs.str_or_empty("localId"), "");
    }

    #[test]
    fn test_null_collections_decode_as_empty() {
        let node: Node =
            serde_json::from_str(r#"{"type":"paragraph","content":null,"marks":null,"attrs":null}"#)
                .unwrap();
        assert!(node.content.is_empty());
        assert!(node.marks.is_empty());
        assert!(node.attrs.is_empty());
    }

    #[test]
    fn test_document_defaults() {
        let doc: Document = serde_json::from_str(r#"{"version":1}"#).unwrap();
        assert_eq!(doc.doc_type, "doc");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_mark_link_href() {
        let mark: Mark =
            serde_json::from_str(r#"{"type":"link","attrs":{"href":"https://example.com"}}"#)
                .unwrap();
        assert_eq!(mark.kind, MarkKind::Link);
        assert_eq!(mark.attrs.str("href"), Some("https://example.com"));
        assert_eq!(mark, Mark::link("https://example.com"));
    }
}
