// src/constants.rs
//! Conventions shared between the renderer, the section merger and the
//! glue around them.
//!
//! The heading constants describe the on-disk ticket format. Changing them
//! breaks the merge for files written by earlier versions.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Saved ticket format
// ---------------------------------------------------------------------------

/// Heading of the user-owned section. Never generated, always preserved.
pub const RESERVED_SECTION_HEADING: &str = "## My Notes";

/// Prefix of the comments heading. The count suffix (`(3)`) is excluded so
/// the section can be found after the count changes.
pub const COMMENTS_SECTION_PREFIX: &str = "## Comments";

/// Marker opening the first line of every rendered ticket.
pub const META_TAG: &str = "jt:meta";

/// Placeholder for metadata rows with no value.
pub const EMPTY_FIELD: &str = "-";

/// Status names that tick a subtask checkbox, compared case-insensitively.
pub const DONE_STATUSES: [&str; 3] = ["done", "closed", "resolved"];

/// Extension of saved ticket files.
pub const TICKET_FILE_EXTENSION: &str = "md";

// ---------------------------------------------------------------------------
// Jira REST API
// ---------------------------------------------------------------------------

/// Issue endpoint; the key is appended.
pub const ISSUE_PATH: &str = "/rest/api/3/issue/";

/// Query asking Jira to include the field-id to display-name map.
pub const ISSUE_EXPAND_NAMES: &str = "expand=names";

/// Endpoint describing the authenticated user.
pub const MYSELF_PATH: &str = "/rest/api/3/myself";

/// Display name of the sprint custom field.
pub const SPRINT_FIELD_NAME: &str = "sprint";

/// Display name of the epic link custom field.
pub const EPIC_LINK_FIELD_NAME: &str = "epic link";

/// Upper bound on a single API round-trip.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

// ---------------------------------------------------------------------------
// Local configuration
// ---------------------------------------------------------------------------

/// Overrides the configuration directory (default `~/.jt`).
pub const CONFIG_DIR_ENV: &str = "JT_CONFIG_DIR";

/// Supplies the API token without touching the credentials file.
pub const TOKEN_ENV: &str = "JT_API_TOKEN";

/// Configuration directory name under the home directory.
pub const CONFIG_DIR_NAME: &str = ".jt";

pub const CONFIG_FILE_NAME: &str = "config.yaml";

pub const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Where tickets are saved when the configuration does not say.
pub const DEFAULT_TICKETS_DIR: &str = "~/.jt/tickets";

/// File name of the debug log, placed in the system temp directory.
pub const LOG_FILE_NAME: &str = "jt.log";
