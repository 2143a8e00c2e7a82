//! Upcoming assignment normalization.
//!
//! The upcoming endpoint answers either with JSON entries or with the
//! platform's own `{"html": "..."}` widget fragment. Both end up as
//! [`AssignmentRecord`]s in source order. What counts as "upcoming" is decided
//! upstream; nothing here filters by date.

use super::{collection_entries, parse_payload, text_field, Entry};
use crate::error::{Result, SchoologyError};
use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

const TITLE_KEYS: &[&str] = &["title", "name"];
const COURSE_KEYS: &[&str] = &["course", "courseTitle", "course_title", "courseName", "class"];
const COURSE_ID_KEYS: &[&str] = &["courseId", "course_id", "courseNid", "sectionId"];
const DUE_KEYS: &[&str] = &["due", "dueAt", "due_at", "dueDate", "due_date"];
const COLLECTION_KEYS: &[&str] = &["assignments", "upcoming", "events", "data"];

/// Due format printed by the upcoming widget, after the `Due ` prefix.
const WIDGET_DUE_FORMAT: &str = "%A, %B %d, %Y at %I:%M %p";
const DUE_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An upcoming assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    pub title: String,
    /// Owning course name, when the source names it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    /// Owning course identifier, when the source carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    pub due_at: String,
}

/// Normalize a raw upcoming-assignments payload into records, in source order.
pub fn normalize_assignments(raw: &str) -> Result<Vec<AssignmentRecord>> {
    let payload = parse_payload(raw)?;

    if let Some(html) = payload.get("html") {
        let html = html.as_str().ok_or_else(|| {
            SchoologyError::Parse("expected the 'html' field to be a string".to_string())
        })?;
        return Ok(assignments_from_html(html));
    }

    let entries = assignment_entries(&payload)?;
    let total = entries.len();
    let assignments: Vec<AssignmentRecord> =
        entries.into_iter().filter_map(assignment_record).collect();

    if assignments.len() < total {
        debug!(
            "Skipped {} incomplete assignment entries",
            total - assignments.len()
        );
    }
    Ok(assignments)
}

fn assignment_entries(payload: &Value) -> Result<Vec<Entry<'_>>> {
    for key in COLLECTION_KEYS {
        if let Some(collection) = payload.get(*key) {
            return collection_entries(collection, key);
        }
    }
    collection_entries(payload, "payload")
}

fn assignment_record((_, value): Entry<'_>) -> Option<AssignmentRecord> {
    let entry = value.as_object()?;

    Some(AssignmentRecord {
        title: text_field(entry, TITLE_KEYS)?,
        course: text_field(entry, COURSE_KEYS),
        course_id: text_field(entry, COURSE_ID_KEYS),
        due_at: text_field(entry, DUE_KEYS)?,
    })
}

/// Extract assignments from the upcoming widget's HTML fragment.
fn assignments_from_html(html: &str) -> Vec<AssignmentRecord> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let (Ok(event_sel), Ok(title_sel), Ok(subtitle_sel)) = (
        Selector::parse(".upcoming-event"),
        Selector::parse(".event-title a"),
        Selector::parse(".readonly-title.event-subtitle"),
    ) else {
        return Vec::new();
    };

    let document = Html::parse_fragment(html);
    let mut out = Vec::new();

    for event in document.select(&event_sel) {
        let Some(title) = event.select(&title_sel).next().map(text_content) else {
            continue;
        };
        let subtitles: Vec<String> = event.select(&subtitle_sel).map(text_content).collect();
        let Some(due_text) = subtitles.first() else {
            continue;
        };
        let course = match subtitles.len() {
            0 | 1 => None,
            n => Some(subtitles[n - 1].clone()).filter(|c| !c.is_empty()),
        };

        let due_at = widget_due(due_text);
        if title.is_empty() || due_at.is_empty() {
            continue;
        }

        out.push(AssignmentRecord {
            title,
            course,
            course_id: None,
            due_at,
        });
    }

    out
}

/// Clean the widget's due text, rendering it as `YYYY-MM-DD HH:MM:SS` when it parses.
fn widget_due(text: &str) -> String {
    let mut due = text.strip_prefix("Due ").unwrap_or(text).trim().to_string();
    // All-day items print the date followed by a bare "at".
    if due.ends_with("at") {
        due.push_str(" 11:59 pm");
    }

    match NaiveDateTime::parse_from_str(&due, WIDGET_DUE_FORMAT) {
        Ok(parsed) => parsed.format(DUE_OUTPUT_FORMAT).to_string(),
        Err(_) => due,
    }
}

fn text_content(elem: ElementRef<'_>) -> String {
    elem.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_list_preserves_due_format() {
        let raw = r#"[{"title":"Essay Draft","course":"English","due":"2024-05-01 23:59:00"}]"#;
        let assignments = normalize_assignments(raw).unwrap();
        assert_eq!(
            assignments,
            vec![AssignmentRecord {
                title: "Essay Draft".to_string(),
                course: Some("English".to_string()),
                course_id: None,
                due_at: "2024-05-01 23:59:00".to_string(),
            }]
        );
        assert_eq!(
            serde_json::to_value(&assignments[0]).unwrap(),
            serde_json::json!({"title": "Essay Draft", "course": "English", "dueAt": "2024-05-01 23:59:00"})
        );
    }

    #[test]
    fn test_entries_without_title_or_due_are_dropped() {
        let raw = r#"{"assignments": [
            {"title": "Lab Report", "courseId": 8812, "dueAt": "2024-05-02T08:00:00Z"},
            {"title": "No due date", "course": "Chemistry"},
            {"course": "Chemistry", "due": "2024-05-03"},
            {"name": "Quiz 4", "class": "Geometry", "due_date": "May 6"}
        ]}"#;
        let assignments = normalize_assignments(raw).unwrap();
        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].title, "Lab Report");
        assert_eq!(assignments[0].course_id.as_deref(), Some("8812"));
        assert_eq!(assignments[0].due_at, "2024-05-02T08:00:00Z");
        assert_eq!(assignments[1].title, "Quiz 4");
        assert_eq!(assignments[1].course.as_deref(), Some("Geometry"));
    }

    #[test]
    fn test_past_due_entries_are_not_filtered_locally() {
        let raw = r#"[{"title": "Old", "due": "1999-01-01 00:00:00"}, {"title": "New", "due": "2099-01-01 00:00:00"}]"#;
        let titles: Vec<String> = normalize_assignments(raw)
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["Old", "New"]);
    }

    #[test]
    fn test_widget_html_payload() {
        let html = r#"
            <div class="upcoming-list">
              <div class="upcoming-event">
                <span class="event-title"><a href="/assignment/1">Chapter 5 Reading</a></span>
                <span class="readonly-title event-subtitle">Due Friday, May 3, 2024 at 11:59 pm</span>
                <span class="readonly-title event-subtitle">AP Biology: Section 3</span>
              </div>
              <div class="upcoming-event">
                <span class="event-title"><a href="/assignment/2">Unit Test</a></span>
                <span class="readonly-title event-subtitle">Due Monday, May 6, 2024 at</span>
                <span class="readonly-title event-subtitle">Geometry</span>
              </div>
              <div class="upcoming-event">
                <span class="readonly-title event-subtitle">Due Tuesday, May 7, 2024 at 9:00 am</span>
              </div>
              <div class="upcoming-event">
                <span class="event-title"><a href="/assignment/4">Field Trip Form</a></span>
                <span class="readonly-title event-subtitle">Due sometime soon</span>
                <span class="readonly-title event-subtitle">Homeroom</span>
              </div>
            </div>
        "#;
        let raw = serde_json::json!({ "html": html }).to_string();
        let assignments = normalize_assignments(&raw).unwrap();

        assert_eq!(assignments.len(), 3);
        assert_eq!(assignments[0].title, "Chapter 5 Reading");
        assert_eq!(assignments[0].due_at, "2024-05-03 23:59:00");
        assert_eq!(assignments[0].course.as_deref(), Some("AP Biology: Section 3"));
        assert_eq!(assignments[1].title, "Unit Test");
        assert_eq!(assignments[1].due_at, "2024-05-06 23:59:00");
        assert_eq!(assignments[2].title, "Field Trip Form");
        assert_eq!(assignments[2].due_at, "sometime soon");
    }

    #[test]
    fn test_empty_widget_html() {
        assert!(normalize_assignments(r#"{"html": ""}"#).unwrap().is_empty());
    }

    #[test]
    fn test_structurally_invalid_payloads() {
        assert!(matches!(
            normalize_assignments("Service Unavailable"),
            Err(SchoologyError::Parse(_))
        ));
        assert!(matches!(
            normalize_assignments(r#"{"html": 17}"#),
            Err(SchoologyError::Parse(_))
        ));
        assert!(matches!(
            normalize_assignments(r#"{"events": true}"#),
            Err(SchoologyError::Parse(_))
        ));
    }
}
