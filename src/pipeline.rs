// src/pipeline.rs
//! The pull pipeline: fetch, render, merge with the saved file, then save
//! or preview.
//!
//! Network access goes through [`IssueRepository`] so the whole flow runs
//! against a fake in tests.

use crate::api::IssueRepository;
use crate::constants::COMMENTS_SECTION_PREFIX;
use crate::error::AppError;
use crate::formatting::{render_comments, render_issue};
use crate::model::Issue;
use crate::output::ChangePreview;
use crate::store::{append_reserved_section, extract_reserved_section, replace_section, TicketStore};
use crate::types::TicketKey;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// What the user asked `jt pull` to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub key: TicketKey,
    pub comments_only: bool,
    pub dry_run: bool,
}

impl PullRequest {
    pub fn full(key: TicketKey) -> Self {
        Self {
            key,
            comments_only: false,
            dry_run: false,
        }
    }

    pub fn comments_only(mut self) -> Self {
        self.comments_only = true;
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }
}

/// What a pull did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullOutcome {
    /// The whole ticket was written.
    Saved { key: TicketKey, path: PathBuf },
    /// Only the comments section was rewritten.
    CommentsUpdated { key: TicketKey, path: PathBuf },
    /// Dry run: nothing was written.
    Preview { key: TicketKey, preview: ChangePreview },
}

impl PullOutcome {
    /// One-line (or, for previews, multi-line) report for the terminal.
    pub fn summary(&self) -> String {
        match self {
            PullOutcome::Saved { key, path } => {
                format!("Saved {} to {}\n", key, path.display())
            }
            PullOutcome::CommentsUpdated { key, path } => {
                format!("Updated comments for {} in {}\n", key, path.display())
            }
            PullOutcome::Preview { key, preview } => preview.render(key),
        }
    }
}

/// Runs one pull. `fetched_at` is stamped into the rendered document.
pub fn pull_ticket<R>(
    repo: &R,
    store: &TicketStore,
    request: &PullRequest,
    fetched_at: DateTime<Utc>,
) -> Result<PullOutcome, AppError>
where
    R: IssueRepository + ?Sized,
{
    log::info!("Pulling {}", request.key);
    let issue = repo.fetch_issue(&request.key)?;
    let key = canonical_key(&issue, &request.key);
    let existing = store.load_if_exists(&key)?;

    let content = if request.comments_only {
        let saved = existing
            .as_deref()
            .ok_or_else(|| AppError::NoLocalTicket(key.to_string()))?;
        replace_section(saved, COMMENTS_SECTION_PREFIX, &render_comments(&issue))
    } else {
        let rendered = render_issue(&issue, fetched_at);
        match existing.as_deref() {
            Some(saved) => append_reserved_section(&rendered, &extract_reserved_section(saved)),
            None => rendered,
        }
    };

    if request.dry_run {
        let preview = ChangePreview::compute(existing.as_deref(), &content);
        return Ok(PullOutcome::Preview { key, preview });
    }

    let path = store.save(&key, &content)?;
    Ok(if request.comments_only {
        PullOutcome::CommentsUpdated { key, path }
    } else {
        PullOutcome::Saved { key, path }
    })
}

/// The key Jira returned, which differs from the requested one after a move.
fn canonical_key(issue: &Issue, requested: &TicketKey) -> TicketKey {
    match TicketKey::parse(&issue.key) {
        Ok(key) => {
            if &key != requested {
                log::info!("{} is now {}", requested, key);
            }
            key
        }
        Err(e) => {
            log::warn!("Jira returned an unusable key {:?}: {}", issue.key, e);
            requested.clone()
        }
    }
}
