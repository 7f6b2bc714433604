// src/store/sections.rs
//! Section-level edits on saved ticket text.
//!
//! A section starts at a line beginning with `## ` and runs to the next such
//! line or end of text. The `## My Notes` section belongs to the user: it is
//! never replaced, and every path through [`replace_section`] keeps it.

use crate::constants::RESERVED_SECTION_HEADING;

/// Returns the reserved notes section through end of text with exactly one
/// trailing newline, or an empty string when the heading is absent.
pub fn extract_reserved_section(text: &str) -> String {
    match text.find(RESERVED_SECTION_HEADING) {
        Some(at) => {
            let mut notes = text[at..].trim_end_matches('\n').to_string();
            notes.push('\n');
            notes
        }
        None => String::new(),
    }
}

/// Appends `notes` to freshly rendered content, separated by a blank line.
/// Empty notes leave the content untouched.
pub fn append_reserved_section(content: &str, notes: &str) -> String {
    if notes.is_empty() {
        return content.to_string();
    }
    format!("{}\n\n{}", content.trim_end(), notes)
}

/// Replaces the section whose heading line starts with `heading_prefix`.
///
/// The prefix is matched at the start of a line, so `## Comments` finds
/// `## Comments (3)` but not `### Comments`. A matching heading inside the
/// reserved notes is ignored. When no section matches, the new one is
/// inserted just before the notes, or appended when there are none.
pub fn replace_section(text: &str, heading_prefix: &str, new_section: &str) -> String {
    let new_section = new_section.trim_end_matches('\n');
    let notes_at = text.find(RESERVED_SECTION_HEADING);
    let start = find_line_start(text, heading_prefix)
        .filter(|&start| notes_at.map_or(true, |notes| start < notes));

    let Some(start) = start else {
        return match notes_at {
            Some(notes) => {
                log::debug!("Inserting '{}' before notes", heading_prefix);
                join_around(&text[..notes], new_section, Some(&text[notes..]))
            }
            None => {
                log::debug!("Appending '{}' at end of document", heading_prefix);
                join_around(text, new_section, None)
            }
        };
    };

    let body_start = start + heading_prefix.len();
    let next_heading = text[body_start..]
        .find("\n## ")
        .map(|offset| body_start + offset + 1);

    // The notes heading bounds the section even when it does not sit at
    // the start of a line.
    let end = match (next_heading, notes_at) {
        (Some(heading), Some(notes)) => Some(heading.min(notes)),
        (heading, notes) => heading.or(notes),
    };

    log::debug!(
        "Replacing '{}' at byte {} (ends {})",
        heading_prefix,
        start,
        end.map_or_else(|| "at end of text".to_string(), |e| format!("at byte {}", e))
    );
    join_around(&text[..start], new_section, end.map(|e| &text[e..]))
}

/// `before` (trimmed) + blank line + `section` + blank line + `after`, or a
/// single trailing newline when nothing follows.
fn join_around(before: &str, section: &str, after: Option<&str>) -> String {
    let before = before.trim_end_matches('\n');
    let mut out = String::with_capacity(before.len() + section.len() + 4);
    if !before.is_empty() {
        out.push_str(before);
        out.push_str("\n\n");
    }
    out.push_str(section);
    match after {
        Some(rest) => {
            out.push_str("\n\n");
            out.push_str(rest);
        }
        None => out.push('\n'),
    }
    out
}

/// First occurrence of `needle` at index 0 or right after a newline.
fn find_line_start(text: &str, needle: &str) -> Option<usize> {
    if text.starts_with(needle) {
        return Some(0);
    }
    text.match_indices(&format!("\n{}", needle))
        .next()
        .map(|(at, _)| at + 1)
}
