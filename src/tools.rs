//! Tool operations exposed to calling agents.

use crate::client::{Fetcher, HttpFetcher};
use crate::config::Settings;
use crate::error::{Result, SchoologyError};
use crate::normalize::{normalize_assignments, normalize_courses, AssignmentRecord, CourseRecord};
use crate::session::SessionContext;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Format returned by [`current_date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Current local date and time.
    GetCurrentDate,

    /// Courses the student is enrolled in.
    GetEnrolledCourses,

    /// Assignments the platform lists as upcoming.
    GetUpcomingAssignments,
}

impl ToolCall {
    pub const ALL: [ToolCall; 3] = [
        ToolCall::GetCurrentDate,
        ToolCall::GetEnrolledCourses,
        ToolCall::GetUpcomingAssignments,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::GetCurrentDate => "get_current_date",
            ToolCall::GetEnrolledCourses => "get_enrolled_courses",
            ToolCall::GetUpcomingAssignments => "get_upcoming_assignments",
        }
    }
}

/// Parse a tool call by name. None of the tools take arguments.
pub fn parse_tool_call(name: &str) -> Result<ToolCall> {
    ToolCall::ALL
        .into_iter()
        .find(|tool| tool.name() == name)
        .ok_or_else(|| SchoologyError::InvalidInput(format!("Unknown tool: {}", name)))
}

/// Current local date and time as `YYYY-MM-DD HH:MM:SS`.
pub fn current_date() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

/// Tool execution context: the session plus the fetcher that uses it.
#[derive(Clone)]
pub struct SchoologyTools {
    session: Arc<SessionContext>,
    fetcher: Arc<dyn Fetcher>,
}

impl SchoologyTools {
    /// Create a new tool context.
    pub fn new(session: Arc<SessionContext>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { session, fetcher }
    }

    /// Build the session and HTTP fetcher from settings. Fails fast on missing configuration.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let session = Arc::new(settings.session_context()?);
        let fetcher = Arc::new(HttpFetcher::new(&settings.http)?);
        debug!("Session configured: {:?}", session);
        Ok(Self::new(session, fetcher))
    }

    /// Fetch and normalize the enrolled courses.
    #[instrument(skip(self))]
    pub async fn get_enrolled_courses(&self) -> Result<Vec<CourseRecord>> {
        let raw = self
            .fetcher
            .fetch(self.session.courses_endpoint(), self.session.cookie())
            .await?;
        let courses = normalize_courses(&raw)?;
        info!("Retrieved {} courses", courses.len());
        Ok(courses)
    }

    /// Fetch and normalize the upcoming assignments.
    #[instrument(skip(self))]
    pub async fn get_upcoming_assignments(&self) -> Result<Vec<AssignmentRecord>> {
        let raw = self
            .fetcher
            .fetch(self.session.upcoming_endpoint(), self.session.cookie())
            .await?;
        let assignments = normalize_assignments(&raw)?;
        info!("Retrieved {} upcoming assignments", assignments.len());
        Ok(assignments)
    }

    /// Execute a tool call and return its result as JSON.
    pub async fn execute(&self, tool: ToolCall) -> Result<Value> {
        match tool {
            ToolCall::GetCurrentDate => Ok(Value::String(current_date())),
            ToolCall::GetEnrolledCourses => to_json(self.get_enrolled_courses().await?),
            ToolCall::GetUpcomingAssignments => to_json(self.get_upcoming_assignments().await?),
        }
    }
}

fn to_json<T: Serialize>(records: Vec<T>) -> Result<Value> {
    serde_json::to_value(records).map_err(|e| SchoologyError::Serialization(e.to_string()))
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use regex::Regex;

    fn tools(responses: Vec<(&str, Canned)>) -> (SchoologyTools, Arc<CannedFetcher>) {
        let session =
            Arc::new(SessionContext::new("SESSabc=1; has_js=1", COURSES_URL, UPCOMING_URL).unwrap());
        let fetcher = Arc::new(CannedFetcher::new(responses));
        (SchoologyTools::new(session, fetcher.clone()), fetcher)
    }

    #[test]
    fn test_current_date_shape() {
        let pattern = Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap();
        assert!(pattern.is_match(&current_date()));
    }

    #[test]
    fn test_parse_tool_call() {
        assert_eq!(parse_tool_call("get_current_date").unwrap(), ToolCall::GetCurrentDate);
        assert_eq!(
            parse_tool_call("get_upcoming_assignments").unwrap(),
            ToolCall::GetUpcomingAssignments
        );
        assert!(matches!(
            parse_tool_call("delete_everything"),
            Err(SchoologyError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_enrolled_courses_round_trip() {
        let (tools, fetcher) = tools(vec![(
            COURSES_URL,
            Canned::Body(r#"{"101": {"title": "Algebra I", "section": "A"}, "102": {"title": ""}}"#),
        )]);

        let first = tools.get_enrolled_courses().await.unwrap();
        let second = tools.get_enrolled_courses().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].title, "Algebra I");

        let cookies = fetcher.cookies_seen.lock().unwrap();
        assert!(cookies.iter().all(|c| c == "SESSabc=1; has_js=1"));
    }

    #[tokio::test]
    async fn test_forbidden_courses_is_authentication_error() {
        let (tools, _) = tools(vec![(COURSES_URL, Canned::Status(403))]);
        let err = tools.get_enrolled_courses().await.unwrap_err();
        assert!(matches!(err, SchoologyError::Authentication { status: 403 }));
    }

    #[tokio::test]
    async fn test_upcoming_assignments_parse_error_propagates() {
        let (tools, _) = tools(vec![(UPCOMING_URL, Canned::Body("<html>Sign in</html>"))]);
        let err = tools.get_upcoming_assignments().await.unwrap_err();
        assert!(matches!(err, SchoologyError::Parse(_)));
    }

    #[tokio::test]
    async fn test_execute_serializes_records() {
        let (tools, _) = tools(vec![(
            UPCOMING_URL,
            Canned::Body(r#"[{"title":"Essay Draft","course":"English","due":"2024-05-01 23:59:00"}]"#),
        )]);

        let value = tools.execute(ToolCall::GetUpcomingAssignments).await.unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"title": "Essay Draft", "course": "English", "dueAt": "2024-05-01 23:59:00"}])
        );

        let date = tools.execute(ToolCall::GetCurrentDate).await.unwrap();
        assert!(date.is_string());
    }

    #[test]
    fn test_unserializable_records_are_an_error() {
        use std::collections::BTreeMap;

        let record: BTreeMap<(u8, u8), u8> = BTreeMap::from([((1, 2), 3)]);
        let err = to_json(vec![record]).unwrap_err();
        assert!(matches!(err, SchoologyError::Serialization(_)));
    }
}
