//! Course listing normalization.

use super::{collection_entries, parse_payload, text_field, Entry};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

const ID_KEYS: &[&str] = &["id", "nid", "courseNid", "courseId", "course_id"];
const TITLE_KEYS: &[&str] = &["title", "courseTitle", "course_title", "name"];
const SECTION_KEYS: &[&str] = &["section", "sectionTitle", "section_title"];

/// A course the student is enrolled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Platform identifier, opaque to this crate.
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// Normalize a raw courses payload into records, in source order.
///
/// Accepts the site-navigation shape (`{"data": {"courses": [...]}}`), a
/// `{"courses": ...}` wrapper, a bare list, or an object keyed by course id.
pub fn normalize_courses(raw: &str) -> Result<Vec<CourseRecord>> {
    let payload = parse_payload(raw)?;
    let entries = course_entries(&payload)?;
    let total = entries.len();

    let courses: Vec<CourseRecord> = entries.into_iter().filter_map(course_record).collect();

    if courses.len() < total {
        debug!("Skipped {} incomplete course entries", total - courses.len());
    }
    Ok(courses)
}

fn course_entries(payload: &Value) -> Result<Vec<Entry<'_>>> {
    if let Some(courses) = payload.get("data").and_then(|data| data.get("courses")) {
        return collection_entries(courses, "data.courses");
    }
    if let Some(courses) = payload.get("courses") {
        return collection_entries(courses, "courses");
    }
    collection_entries(payload, "payload")
}

fn course_record((key, value): Entry<'_>) -> Option<CourseRecord> {
    let entry = value.as_object()?;

    let id = match key {
        Some(key) if !key.trim().is_empty() => key.trim().to_string(),
        _ => text_field(entry, ID_KEYS)?,
    };
    let title = text_field(entry, TITLE_KEYS)?;
    let section = text_field(entry, SECTION_KEYS);

    Some(CourseRecord { id, title, section })
}
