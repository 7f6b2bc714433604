// src/formatting/adf/mod.rs
//! Converts Atlassian Document Format trees into markdown.
//!
//! Every render call returns its own `String`; container nodes nest calls
//! rather than sharing a buffer. Unknown node types never fail: they render
//! their children when they have any and otherwise produce nothing.

mod inline;
mod table;

pub use self::inline::{apply_marks, render_inline, render_inline_nodes};

use crate::model::{Document, Node, NodeKind};

/// Renders a whole document. Trailing newlines are trimmed from the result.
pub fn render_document(doc: &Document) -> String {
    if doc.is_empty() {
        return String::new();
    }

    let rendered = MarkdownNodeRenderer.render_nodes(&doc.content, 0);
    log::debug!(
        "Rendered document with {} top-level nodes into {} bytes",
        doc.content.len(),
        rendered.len()
    );
    rendered.trim_end_matches('\n').to_string()
}

/// Renders an optional document, treating absence like an empty document.
pub fn render_optional(doc: Option<&Document>) -> String {
    doc.map(render_document).unwrap_or_default()
}

/// Trait for rendering block-level nodes into markdown.
pub trait NodeRenderer {
    /// Render one node at the given list depth.
    fn render_node(&self, node: &Node, depth: usize) -> String;

    /// Render siblings in order and concatenate them.
    fn render_nodes(&self, nodes: &[Node], depth: usize) -> String {
        nodes.iter().map(|node| self.render_node(node, depth)).collect()
    }
}

/// Renders ADF block nodes as GitHub-flavored markdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownNodeRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListStyle {
    Bullet,
    Ordered,
}

impl ListStyle {
    fn marker(self, position: usize) -> String {
        match self {
            ListStyle::Bullet => "- ".to_string(),
            ListStyle::Ordered => format!("{}. ", position),
        }
    }
}

impl NodeRenderer for MarkdownNodeRenderer {
    fn render_node(&self, node: &Node, depth: usize) -> String {
        match &node.kind {
            NodeKind::Paragraph => format!("{}\n\n", render_inline_nodes(&node.content)),
            NodeKind::Heading => {
                let level = node.attrs.int_or("level", 1).max(1) as usize;
                format!(
                    "{} {}\n\n",
                    "#".repeat(level),
                    render_inline_nodes(&node.content)
                )
            }
            NodeKind::BulletList => self.render_list(&node.content, depth, ListStyle::Bullet),
            NodeKind::OrderedList => self.render_list(&node.content, depth, ListStyle::Ordered),
            NodeKind::ListItem => self.render_list_item(node, depth),
            NodeKind::CodeBlock => format!(
                "```{}\n{}\n```\n\n",
                node.attrs.str_or_empty("language"),
                plain_text(&node.content)
            ),
            NodeKind::Blockquote => quote_lines(&self.render_nodes(&node.content, depth), None),
            NodeKind::Panel => {
                let label = panel_label(node.attrs.str_or_empty("panelType"));
                quote_lines(&self.render_nodes(&node.content, depth), label)
            }
            NodeKind::Table => table::render_table(self, &node.content),
            NodeKind::Rule => "---\n\n".to_string(),
            NodeKind::MediaSingle | NodeKind::MediaGroup => {
                self.render_nodes(&node.content, depth)
            }
            NodeKind::Unknown(tag) => {
                log::debug!("Passing through unknown block node '{}'", tag);
                self.render_nodes(&node.content, depth)
            }
            // Inline kinds are only rendered inside a paragraph-like parent;
            // at block level they contribute their children, if any.
            _ => self.render_nodes(&node.content, depth),
        }
    }
}

impl MarkdownNodeRenderer {
    fn render_list(&self, items: &[Node], depth: usize, style: ListStyle) -> String {
        let indent = "  ".repeat(depth);
        let mut out = String::new();

        for (i, item) in items.iter().enumerate() {
            out.push_str(&indent);
            out.push_str(&style.marker(i + 1));
            out.push_str(&self.render_list_item(item, depth));
        }

        // Nested lists end inside their parent item; only the outermost
        // list closes with a blank line.
        if depth == 0 {
            out.push('\n');
        }
        out
    }

    fn render_list_item(&self, item: &Node, depth: usize) -> String {
        if item.content.is_empty() {
            return "\n".to_string();
        }

        let mut out = String::new();
        for (i, child) in item.content.iter().enumerate() {
            match &child.kind {
                NodeKind::Paragraph => {
                    out.push_str(&render_inline_nodes(&child.content));
                    out.push('\n');
                }
                kind if kind.is_list() => {
                    // A list as the first child still needs its own line.
                    if i == 0 {
                        out.push('\n');
                    }
                    let style = if child.kind == NodeKind::OrderedList {
                        ListStyle::Ordered
                    } else {
                        ListStyle::Bullet
                    };
                    out.push_str(&self.render_list(&child.content, depth + 1, style));
                }
                _ => {
                    out.push_str(self.render_node(child, depth).trim_end_matches('\n'));
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// Concatenates all text in a subtree, ignoring marks.
fn plain_text(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|node| {
            let mut text = node.text_or_empty().to_string();
            text.push_str(&plain_text(&node.content));
            text
        })
        .collect()
}

fn panel_label(panel_type: &str) -> Option<&'static str> {
    match panel_type.to_ascii_lowercase().as_str() {
        "info" => Some("**Info:**"),
        "note" => Some("**Note:**"),
        "warning" => Some("**Warning:**"),
        "error" => Some("**Error:**"),
        "success" => Some("**Success:**"),
        _ => None,
    }
}

/// Prefixes every line with `> `, putting `label` on the first one.
fn quote_lines(content: &str, label: Option<&str>) -> String {
    let mut out = String::new();
    for (i, line) in content.trim_end_matches('\n').split('\n').enumerate() {
        out.push_str("> ");
        if let (0, Some(label)) = (i, label) {
            out.push_str(label);
            out.push(' ');
        }
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mark;
    use pretty_assertions::assert_eq;

    fn doc(content: Vec<Node>) -> Document {
        Document::new(content)
    }

    fn list(kind: NodeKind, items: Vec<Node>) -> Node {
        Node::new(kind).with_content(items)
    }

    fn item(children: Vec<Node>) -> Node {
        Node::new(NodeKind::ListItem).with_content(children)
    }

    #[test]
    fn test_empty_document_renders_nothing() {
        assert_eq!(render_document(&Document::default()), "");
        assert_eq!(render_optional(None), "");
    }

    #[test]
    fn test_single_paragraph_is_plain_text() {
        assert_eq!(render_document(&doc(vec![Node::paragraph("Hello")])), "Hello");
    }

    #[test]
    fn test_inline_marks_in_paragraph() {
        let paragraph = Node::new(NodeKind::Paragraph).with_content(vec![
            Node::text("bold").with_marks(vec![Mark::strong()]),
            Node::text(" and "),
            Node::text("italic").with_marks(vec![Mark::em()]),
            Node::text(" and "),
            Node::text("code").with_marks(vec![Mark::code()]),
        ]);
        assert_eq!(
            render_document(&doc(vec![paragraph])),
            "**bold** and *italic* and `code`"
        );
    }

    #[test]
    fn test_heading_levels() {
        let h2 = Node::new(NodeKind::Heading)
            .with_attr("level", 2)
            .with_content(vec![Node::text("Title")]);
        let untagged = Node::new(NodeKind::Heading).with_content(vec![Node::text("Top")]);
        let zero = Node::new(NodeKind::Heading)
            .with_attr("level", 0)
            .with_content(vec![Node::text("Zero")]);
        let deep = Node::new(NodeKind::Heading)
            .with_attr("level", 7)
            .with_content(vec![Node::text("Deep")]);
        assert_eq!(
            render_document(&doc(vec![h2, untagged, zero, deep])),
            "## Title\n\n# Top\n\n# Zero\n\n####### Deep"
        );
    }

    #[test]
    fn test_stray_inline_nodes_at_block_level_render_nothing() {
        let stray = vec![
            Node::text("lost"),
            Node::new(NodeKind::Mention).with_attr("text", "@Ann"),
            Node::paragraph("kept"),
        ];
        assert_eq!(render_document(&doc(stray)), "kept");
    }

    #[test]
    fn test_nested_bullet_list() {
        let nested = list(
            NodeKind::BulletList,
            vec![item(vec![
                Node::paragraph("Parent"),
                list(NodeKind::BulletList, vec![item(vec![Node::paragraph("Child")])]),
            ])],
        );
        assert_eq!(render_document(&doc(vec![nested])), "- Parent\n  - Child");
    }

    #[test]
    fn test_ordered_list_numbers_reset_per_list() {
        let ordered = list(
            NodeKind::OrderedList,
            vec![
                item(vec![Node::paragraph("First")]),
                item(vec![
                    Node::paragraph("Second"),
                    list(
                        NodeKind::OrderedList,
                        vec![
                            item(vec![Node::paragraph("Inner one")]),
                            item(vec![Node::paragraph("Inner two")]),
                        ],
                    ),
                ]),
                item(vec![Node::paragraph("Third")]),
            ],
        );
        assert_eq!(
            render_document(&doc(vec![ordered])),
            "1. First\n2. Second\n  1. Inner one\n  2. Inner two\n3. Third"
        );
    }

    #[test]
    fn test_list_item_starting_with_nested_list() {
        let nested = list(
            NodeKind::BulletList,
            vec![item(vec![list(
                NodeKind::BulletList,
                vec![item(vec![Node::paragraph("Only child")])],
            )])],
        );
        assert_eq!(render_document(&doc(vec![nested])), "- \n  - Only child");
    }

    #[test]
    fn test_list_item_with_code_block_is_trimmed() {
        let code = Node::new(NodeKind::CodeBlock).with_content(vec![Node::text("x = 1")]);
        let bullets = list(
            NodeKind::BulletList,
            vec![item(vec![Node::paragraph("Step"), code])],
        );
        assert_eq!(
            render_document(&doc(vec![bullets])),
            "- Step\n```\nx = 1\n```"
        );
    }

    #[test]
    fn test_code_block_ignores_marks() {
        let code = Node::new(NodeKind::CodeBlock)
            .with_attr("language", "go")
            .with_content(vec![
                Node::text("fmt.Println(").with_marks(vec![Mark::strong()]),
                Node::text("\"hello\")"),
            ]);
        assert_eq!(
            render_document(&doc(vec![code])),
            "```go\nfmt.Println(\"hello\")\n```"
        );
    }

    #[test]
    fn test_blockquote_prefixes_every_line() {
        let quote = Node::new(NodeKind::Blockquote)
            .with_content(vec![Node::paragraph("One"), Node::paragraph("Two")]);
        assert_eq!(render_document(&doc(vec![quote])), "> One\n> \n> Two");
    }

    #[test]
    fn test_panel_labels() {
        let warning = Node::new(NodeKind::Panel)
            .with_attr("panelType", "warning")
            .with_content(vec![Node::paragraph("Be careful!")]);
        assert_eq!(
            render_document(&doc(vec![warning])),
            "> **Warning:** Be careful!"
        );

        let custom = Node::new(NodeKind::Panel)
            .with_attr("panelType", "custom")
            .with_content(vec![Node::paragraph("Plain")]);
        assert_eq!(render_document(&doc(vec![custom])), "> Plain");
    }

    #[test]
    fn test_table_with_header() {
        let cell = |text: &str| {
            Node::new(NodeKind::TableCell).with_content(vec![Node::paragraph(text)])
        };
        let header = |text: &str| {
            Node::new(NodeKind::TableHeader).with_content(vec![Node::paragraph(text)])
        };
        let table = Node::new(NodeKind::Table).with_content(vec![
            Node::new(NodeKind::TableRow).with_content(vec![header("Name"), header("Age")]),
            Node::new(NodeKind::TableRow).with_content(vec![cell("Alice"), cell("30")]),
        ]);
        assert_eq!(
            render_document(&doc(vec![table])),
            "| Name | Age |\n| --- | --- |\n| Alice | 30 |"
        );
    }

    #[test]
    fn test_rule_between_paragraphs() {
        let content = vec![
            Node::paragraph("Above"),
            Node::new(NodeKind::Rule),
            Node::paragraph("Below"),
        ];
        assert_eq!(render_document(&doc(content)), "Above\n\n---\n\nBelow");
    }

    #[test]
    fn test_hard_break() {
        let paragraph = Node::new(NodeKind::Paragraph).with_content(vec![
            Node::text("Line 1"),
            Node::new(NodeKind::HardBreak),
            Node::text("Line 2"),
        ]);
        assert_eq!(render_document(&doc(vec![paragraph])), "Line 1  \nLine 2");
    }

    #[test]
    fn test_media_is_dropped_but_children_kept() {
        let media = Node::new(NodeKind::MediaSingle)
            .with_content(vec![Node::new("media").with_attr("id", "abc")]);
        let content = vec![Node::paragraph("Before"), media, Node::paragraph("After")];
        assert_eq!(render_document(&doc(content)), "Before\n\nAfter");
    }

    #[test]
    fn test_unknown_block_passes_through() {
        let unknown = Node::new("expand").with_content(vec![Node::paragraph("fallback content")]);
        assert_eq!(render_document(&doc(vec![unknown])), "fallback content");

        let empty = Node::new("extension").with_text("ignored");
        assert_eq!(render_document(&doc(vec![empty])), "");
    }
}
