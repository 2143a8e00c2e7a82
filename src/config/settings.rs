//! Configuration settings for schoology-mcp.

use crate::error::{Result, SchoologyError};
use crate::session::SessionContext;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Environment variables that override the configuration file.
pub const ENV_COOKIE: &str = "SCHOOLOGY_COOKIE";
pub const ENV_COOKIE_FILE: &str = "SCHOOLOGY_COOKIE_FILE";
pub const ENV_BASE_URL: &str = "SCHOOLOGY_BASE_URL";
pub const ENV_COURSES_ENDPOINT: &str = "SCHOOLOGY_COURSES_ENDPOINT";
pub const ENV_UPCOMING_ENDPOINT: &str = "SCHOOLOGY_UPCOMING_ENDPOINT";

/// Firefox user agent; the platform serves its XHR endpoints to browsers.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:142.0) Gecko/20100101 Firefox/142.0";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub session: SessionSettings,
    pub http: HttpSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Borrowed browser session and the endpoints it is sent to.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionSettings {
    /// Raw `Cookie` header copied from a logged-in browser.
    pub cookie: String,
    /// File holding the cookie, used when `cookie` is empty.
    pub cookie_file: Option<String>,
    /// Base URL of the school's instance (e.g. https://app.schoology.com).
    pub base_url: Option<String>,
    /// Courses endpoint, absolute or relative to `base_url`.
    pub courses_endpoint: String,
    /// Upcoming assignments endpoint, absolute or relative to `base_url`.
    pub upcoming_endpoint: String,
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds. 0 (the default) leaves the transport unbounded;
    /// 30 is a sensible value for interactive use.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file, then apply the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        Ok(settings.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply environment overrides through `lookup`. Empty values are ignored.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(cookie) = get(ENV_COOKIE) {
            self.session.cookie = cookie;
        }
        if let Some(path) = get(ENV_COOKIE_FILE) {
            self.session.cookie_file = Some(path);
        }
        if let Some(base) = get(ENV_BASE_URL) {
            self.session.base_url = Some(base);
        }
        if let Some(endpoint) = get(ENV_COURSES_ENDPOINT) {
            self.session.courses_endpoint = endpoint;
        }
        if let Some(endpoint) = get(ENV_UPCOMING_ENDPOINT) {
            self.session.upcoming_endpoint = endpoint;
        }
        self
    }

    /// Build the immutable session context from these settings.
    pub fn session_context(&self) -> Result<SessionContext> {
        let cookie = self.cookie()?;
        let courses = self.resolve_endpoint(&self.session.courses_endpoint, ENV_COURSES_ENDPOINT)?;
        let upcoming =
            self.resolve_endpoint(&self.session.upcoming_endpoint, ENV_UPCOMING_ENDPOINT)?;
        SessionContext::new(&cookie, &courses, &upcoming)
    }

    /// The configured cookie, falling back to `cookie_file`.
    pub fn cookie(&self) -> Result<String> {
        let inline = self.session.cookie.trim();
        if !inline.is_empty() {
            return Ok(inline.to_string());
        }

        if let Some(file) = &self.session.cookie_file {
            let path = Self::expand_path(file);
            let content = std::fs::read_to_string(&path).map_err(|e| {
                SchoologyError::Config(format!(
                    "Failed to read cookie file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            let cookie = content.trim();
            if !cookie.is_empty() {
                return Ok(cookie.to_string());
            }
        }

        Err(SchoologyError::Config(format!(
            "Please set {} environment variable first.",
            ENV_COOKIE
        )))
    }

    /// Resolve an endpoint, joining relative paths onto `base_url`.
    pub fn resolve_endpoint(&self, endpoint: &str, env_key: &str) -> Result<String> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(SchoologyError::Config(format!(
                "Please set {} environment variable first.",
                env_key
            )));
        }
        if Url::parse(endpoint).is_ok() {
            return Ok(endpoint.to_string());
        }

        let base = self
            .session
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| {
                SchoologyError::Config(format!(
                    "{} is a relative path; set {} as well.",
                    env_key, ENV_BASE_URL
                ))
            })?;

        let base = Url::parse(base).map_err(|e| {
            SchoologyError::Config(format!("Invalid {} '{}': {}", ENV_BASE_URL, base, e))
        })?;
        let joined = base.join(endpoint).map_err(|e| {
            SchoologyError::Config(format!("Cannot join '{}' onto {}: {}", endpoint, base, e))
        })?;
        Ok(joined.to_string())
    }

    /// A copy safe to print: the cookie is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.session.cookie = mask_secret(&copy.session.cookie);
        copy
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("schoology-mcp")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

/// Mask a secret, keeping a short prefix and suffix for recognition.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.is_empty() {
        String::new()
    } else if chars.len() <= 12 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
