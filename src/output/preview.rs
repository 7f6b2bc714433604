// src/output/preview.rs
//! Dry-run previews: what a pull would do to the saved file.

use crate::types::TicketKey;

/// One changed line. Unchanged lines are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeLine {
    Removed(String),
    Added(String),
}

/// Outcome of comparing the saved file with freshly generated content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangePreview {
    /// No saved file yet; carries the full content that would be written.
    Create(String),
    Unchanged,
    Changed(Vec<ChangeLine>),
}

impl ChangePreview {
    /// Compares at line granularity. Blank changed lines are dropped.
    pub fn compute(existing: Option<&str>, updated: &str) -> Self {
        let Some(existing) = existing else {
            return ChangePreview::Create(updated.to_string());
        };
        if existing == updated {
            return ChangePreview::Unchanged;
        }

        let lines = diff::lines(existing, updated)
            .into_iter()
            .filter_map(|change| match change {
                diff::Result::Left(old) if !old.is_empty() => {
                    Some(ChangeLine::Removed(old.to_string()))
                }
                diff::Result::Right(new) if !new.is_empty() => {
                    Some(ChangeLine::Added(new.to_string()))
                }
                _ => None,
            })
            .collect();
        ChangePreview::Changed(lines)
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, ChangePreview::Unchanged)
    }

    /// Human-readable report for the terminal.
    pub fn render(&self, key: &TicketKey) -> String {
        match self {
            ChangePreview::Create(content) => {
                format!("Would create new file for {}:\n\n{}", key, content)
            }
            ChangePreview::Unchanged => format!("No changes for {}\n", key),
            ChangePreview::Changed(lines) => {
                let mut out = format!("Changes for {}:\n\n", key);
                for line in lines {
                    match line {
                        ChangeLine::Removed(text) => out.push_str(&format!("- {}\n", text)),
                        ChangeLine::Added(text) => out.push_str(&format!("+ {}\n", text)),
                    }
                }
                out
            }
        }
    }
}
