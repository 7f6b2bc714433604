//! Table rendering: header row, separator, then body rows padded to the
//! widest row.

use super::NodeRenderer;
use crate::model::{Node, NodeKind};

/// Renders the `tableRow` children of a table node. Other children are skipped.
pub fn render_table<R: NodeRenderer + ?Sized>(renderer: &R, rows: &[Node]) -> String {
    let table: Vec<Vec<String>> = rows
        .iter()
        .filter(|row| row.kind == NodeKind::TableRow)
        .map(|row| {
            row.content
                .iter()
                .map(|cell| collapse_cell(&renderer.render_nodes(&cell.content, 0)))
                .collect()
        })
        .collect();

    let Some((header, body)) = table.split_first() else {
        return String::new();
    };

    let columns = table.iter().map(Vec::len).max().unwrap_or(0);

    let mut out = format_row(header, columns);
    out.push('|');
    out.push_str(&" --- |".repeat(columns));
    out.push('\n');
    for row in body {
        out.push_str(&format_row(row, columns));
    }
    out.push('\n');
    out
}

/// Flattens rendered cell content onto one line and escapes column separators.
fn collapse_cell(content: &str) -> String {
    content
        .trim_end_matches('\n')
        .replace('\n', " ")
        .replace('|', "\\|")
}

fn format_row(cells: &[String], columns: usize) -> String {
    let mut row = String::from("|");
    for i in 0..columns {
        row.push(' ');
        row.push_str(cells.get(i).map(String::as_str).unwrap_or(""));
        row.push_str(" |");
    }
    row.push('\n');
    row
}
