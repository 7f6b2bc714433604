// src/api/custom_fields.rs
//! Sprint and epic values hidden behind instance-specific custom field ids.
//!
//! Jira names custom fields `customfield_NNNNN`; the `names` map returned
//! with `expand=names` links those ids to display names. Values come in
//! several shapes depending on Jira version and configuration.

use crate::constants::{EPIC_LINK_FIELD_NAME, SPRINT_FIELD_NAME};
use crate::model::{Epic, Sprint};
use serde_json::Value;
use std::collections::BTreeMap;

/// Custom field values the renderer knows how to show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomFields {
    pub sprint: Option<Sprint>,
    pub epic: Option<Epic>,
}

/// Looks up the sprint and epic fields by display name (case-insensitive)
/// and decodes their values from the raw `fields` object.
pub fn extract_custom_fields(fields: &Value, names: &BTreeMap<String, Value>) -> CustomFields {
    let mut sprint_id = None;
    let mut epic_id = None;
    for (id, name) in names {
        match name.as_str().map(str::to_lowercase).as_deref() {
            Some(SPRINT_FIELD_NAME) => sprint_id = Some(id.as_str()),
            Some(EPIC_LINK_FIELD_NAME) => epic_id = Some(id.as_str()),
            _ => {}
        }
    }

    let sprint = sprint_id
        .and_then(|id| fields.get(id))
        .and_then(parse_sprint);
    let epic = epic_id.and_then(|id| fields.get(id)).and_then(parse_epic);

    log::debug!(
        "Custom fields: sprint {:?} -> {:?}, epic {:?} -> {:?}",
        sprint_id,
        sprint.as_ref().map(|s| s.name.as_str()),
        epic_id,
        epic.as_ref().map(|e| e.key.as_str())
    );

    CustomFields { sprint, epic }
}

/// An array yields its last (current) sprint; an object must carry a name.
pub fn parse_sprint(value: &Value) -> Option<Sprint> {
    match value {
        Value::Array(_) => serde_json::from_value::<Vec<Sprint>>(value.clone())
            .ok()
            .and_then(|mut sprints| sprints.pop()),
        Value::Object(_) => serde_json::from_value::<Sprint>(value.clone())
            .ok()
            .filter(|sprint| !sprint.name.is_empty()),
        _ => None,
    }
}

/// An object with a key, or a bare key string.
pub fn parse_epic(value: &Value) -> Option<Epic> {
    match value {
        Value::Object(_) => serde_json::from_value::<Epic>(value.clone())
            .ok()
            .filter(|epic| !epic.key.is_empty()),
        Value::String(key) if !key.is_empty() => Some(Epic {
            key: key.clone(),
            summary: String::new(),
        }),
        _ => None,
    }
}
