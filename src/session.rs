//! Session context shared by every fetch.
//!
//! Holds the borrowed browser cookie and the two endpoint URLs. Built once at
//! startup and never mutated; clone the surrounding `Arc` to share it.

use crate::error::{Result, SchoologyError};
use reqwest::header::HeaderValue;
use std::fmt;
use url::Url;

/// Immutable credentials and endpoints for one process.
#[derive(Clone)]
pub struct SessionContext {
    cookie: String,
    courses_endpoint: Url,
    upcoming_endpoint: Url,
}

impl SessionContext {
    /// Validate and build a session context.
    ///
    /// The cookie must be non-empty and usable as an HTTP header value. Both
    /// endpoints must be absolute `http` or `https` URLs.
    pub fn new(cookie: &str, courses_endpoint: &str, upcoming_endpoint: &str) -> Result<Self> {
        if cookie.trim().is_empty() {
            return Err(SchoologyError::Config(
                "Session cookie is empty. Set SCHOOLOGY_COOKIE first.".to_string(),
            ));
        }
        HeaderValue::from_str(cookie).map_err(|_| {
            SchoologyError::Config(
                "Session cookie contains characters that cannot be sent in an HTTP header"
                    .to_string(),
            )
        })?;

        Ok(Self {
            cookie: cookie.to_string(),
            courses_endpoint: parse_endpoint("courses", courses_endpoint)?,
            upcoming_endpoint: parse_endpoint("upcoming", upcoming_endpoint)?,
        })
    }

    pub fn cookie(&self) -> &str {
        &self.cookie
    }

    pub fn courses_endpoint(&self) -> &Url {
        &self.courses_endpoint
    }

    pub fn upcoming_endpoint(&self) -> &Url {
        &self.upcoming_endpoint
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("cookie", &"<redacted>")
            .field("courses_endpoint", &self.courses_endpoint.as_str())
            .field("upcoming_endpoint", &self.upcoming_endpoint.as_str())
            .finish()
    }
}

fn parse_endpoint(name: &str, raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(SchoologyError::Config(format!(
            "The {} endpoint is not configured",
            name
        )));
    }

    let url = Url::parse(raw).map_err(|e| {
        SchoologyError::Config(format!("Invalid {} endpoint '{}': {}", name, raw, e))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SchoologyError::Config(format!(
            "The {} endpoint must use http or https, got '{}'",
            name, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COURSES: &str = "https://app.schoology.com/iapi2/site-navigation/courses";
    const UPCOMING: &str = "https://app.schoology.com/home/upcoming_ajax";

    #[test]
    fn test_valid_context() {
        let session = SessionContext::new("SESSabc=123; has_js=1", COURSES, UPCOMING).unwrap();
        assert_eq!(session.cookie(), "SESSabc=123; has_js=1");
        assert_eq!(session.courses_endpoint().as_str(), COURSES);
        assert_eq!(session.upcoming_endpoint().as_str(), UPCOMING);
    }

    #[test]
    fn test_rejects_empty_cookie() {
        let err = SessionContext::new("  ", COURSES, UPCOMING).unwrap_err();
        assert!(matches!(err, SchoologyError::Config(_)));
    }

    #[test]
    fn test_rejects_cookie_with_newline() {
        assert!(SessionContext::new("a=1\nb=2", COURSES, UPCOMING).is_err());
    }

    #[test]
    fn test_rejects_relative_and_non_http_endpoints() {
        assert!(SessionContext::new("a=1", "/iapi2/site-navigation/courses", UPCOMING).is_err());
        assert!(SessionContext::new("a=1", COURSES, "ftp://example.com/upcoming").is_err());
        assert!(SessionContext::new("a=1", COURSES, "").is_err());
    }

    #[test]
    fn test_debug_redacts_cookie() {
        let session = SessionContext::new("SESSsecret=42", COURSES, UPCOMING).unwrap();
        let debug = format!("{:?}", session);
        assert!(!debug.contains("SESSsecret"));
        assert!(debug.contains("<redacted>"));
    }
}
