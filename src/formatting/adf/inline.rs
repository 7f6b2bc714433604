//! Inline content: text runs with their marks, mentions, emoji, breaks and
//! smart links.

use crate::model::{Mark, MarkKind, Node, NodeKind};

/// Renders a run of inline nodes into a single line of markdown.
pub fn render_inline_nodes(nodes: &[Node]) -> String {
    nodes.iter().map(render_inline).collect()
}

/// Renders one inline node.
pub fn render_inline(node: &Node) -> String {
    match &node.kind {
        NodeKind::Text => apply_marks(node.text_or_empty(), &node.marks),
        NodeKind::Mention => format_mention(node),
        NodeKind::Emoji => node.attrs.str_or_empty("shortName").to_string(),
        NodeKind::HardBreak => "  \n".to_string(),
        NodeKind::InlineCard => {
            let url = node.attrs.str_or_empty("url");
            if url.is_empty() {
                String::new()
            } else {
                format!("[{}]({})", url, url)
            }
        }
        _ if node.has_children() => render_inline_nodes(&node.content),
        _ => node.text_or_empty().to_string(),
    }
}

/// Wraps `text` in each mark in list order; later marks wrap earlier ones.
pub fn apply_marks(text: &str, marks: &[Mark]) -> String {
    marks
        .iter()
        .fold(text.to_string(), |wrapped, mark| match &mark.kind {
            MarkKind::Strong => format!("**{}**", wrapped),
            MarkKind::Em => format!("*{}*", wrapped),
            MarkKind::Code => format!("`{}`", wrapped),
            MarkKind::Strike => format!("~~{}~~", wrapped),
            MarkKind::Link => format!("[{}]({})", wrapped, mark.attrs.str_or_empty("href")),
            MarkKind::Unknown(tag) => {
                log::debug!("Ignoring unsupported mark: {}", tag);
                wrapped
            }
        })
}

/// `@name`, preferring the `text` attribute over the node's own text.
fn format_mention(node: &Node) -> String {
    let name = node
        .attrs
        .str("text")
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| node.text_or_empty());

    if name.starts_with('@') {
        name.to_string()
    } else {
        format!("@{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_wrap_in_list_order() {
        assert_eq!(apply_marks("hi", &[Mark::strong(), Mark::em()]), "***hi***");
        assert_eq!(apply_marks("hi", &[Mark::code(), Mark::strong()]), "**`hi`**");
        assert_eq!(
            apply_marks("docs", &[Mark::strong(), Mark::link("https://x.io")]),
            "[**docs**](https://x.io)"
        );
        assert_eq!(
            apply_marks("docs", &[Mark::link("https://x.io"), Mark::strong()]),
            "**[docs](https://x.io)**"
        );
    }

    #[test]
    fn test_link_without_href_renders_empty_target() {
        let mark = Mark::new(MarkKind::Link);
        assert_eq!(apply_marks("x", &[mark]), "[x]()");
    }

    #[test]
    fn test_unknown_marks_are_ignored() {
        let mark = Mark::new(MarkKind::Unknown("textColor".to_string()));
        assert_eq!(apply_marks("plain", &[mark, Mark::strike()]), "~~plain~~");
    }

    #[test]
    fn test_mention_prefers_attribute_and_adds_at_once() {
        let with_attr = Node::new(NodeKind::Mention).with_attr("text", "@Alice");
        assert_eq!(render_inline(&with_attr), "@Alice");

        let bare_attr = Node::new(NodeKind::Mention).with_attr("text", "Bob");
        assert_eq!(render_inline(&bare_attr), "@Bob");

        let raw_text = Node::new(NodeKind::Mention).with_text("Carol");
        assert_eq!(render_inline(&raw_text), "@Carol");
    }

    #[test]
    fn test_emoji_and_inline_card() {
        let emoji = Node::new(NodeKind::Emoji).with_attr("shortName", ":tada:");
        assert_eq!(render_inline(&emoji), ":tada:");
        assert_eq!(render_inline(&Node::new(NodeKind::Emoji)), "");

        let card = Node::new(NodeKind::InlineCard).with_attr("url", "https://x.io/a");
        assert_eq!(render_inline(&card), "[https://x.io/a](https://x.io/a)");
        assert_eq!(render_inline(&Node::new(NodeKind::InlineCard)), "");
    }

    #[test]
    fn test_unknown_inline_falls_back() {
        let with_children =
            Node::new("status").with_content(vec![Node::text("IN "), Node::text("REVIEW")]);
        assert_eq!(render_inline(&with_children), "IN REVIEW");

        let with_text = Node::new("date").with_text("2026-01-01");
        assert_eq!(render_inline(&with_text), "2026-01-01");

        assert_eq!(render_inline(&Node::new("placeholder")), "");
    }
}
