//! Doctor command - verify configuration without contacting Schoology.

use crate::cli::Output;
use crate::config::{
    mask_secret, Settings, ENV_BASE_URL, ENV_COOKIE, ENV_COURSES_ENDPOINT, ENV_UPCOMING_ENDPOINT,
};
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("schoology-mcp Doctor");
    println!();
    println!("Checking configuration (no requests are sent)...\n");

    let checks = vec![
        check_config_file(),
        check_cookie(settings),
        check_endpoint(
            settings,
            "Courses endpoint",
            &settings.session.courses_endpoint,
            ENV_COURSES_ENDPOINT,
        ),
        check_endpoint(
            settings,
            "Upcoming endpoint",
            &settings.session.upcoming_endpoint,
            ENV_UPCOMING_ENDPOINT,
        ),
        check_session(settings),
    ];
    for check in &checks {
        check.print();
    }

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before starting the server.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed. Cookie validity is only known once a tool is called.");
    }

    Ok(())
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "not found, using environment only",
            "Optional: create it to avoid exporting variables",
        )
    }
}

/// Check that a cookie is configured, without printing it.
fn check_cookie(settings: &Settings) -> CheckResult {
    match settings.cookie() {
        Ok(cookie) => {
            let pairs = cookie.split(';').filter(|p| p.contains('=')).count();
            CheckResult::ok(
                ENV_COOKIE,
                &format!("configured ({}, {} pair(s))", mask_secret(&cookie), pairs),
            )
        }
        Err(e) => CheckResult::error(
            ENV_COOKIE,
            &e.to_string(),
            "Copy the Cookie request header from a logged-in browser tab (developer tools, Network)",
        ),
    }
}

/// Check that an endpoint resolves to a URL.
fn check_endpoint(settings: &Settings, name: &str, endpoint: &str, env_key: &str) -> CheckResult {
    match settings.resolve_endpoint(endpoint, env_key) {
        Ok(url) => CheckResult::ok(name, &url),
        Err(e) => CheckResult::error(
            name,
            &e.to_string(),
            &format!("Set {} (and {} for relative paths)", env_key, ENV_BASE_URL),
        ),
    }
}

/// Check that the full session context validates.
fn check_session(settings: &Settings) -> CheckResult {
    match settings.session_context() {
        Ok(_) => CheckResult::ok("Session", "ready"),
        Err(e) => CheckResult::error("Session", &e.to_string(), "Fix the items above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_missing_values_are_errors() {
        let settings = Settings::default();
        assert_eq!(check_cookie(&settings).status, CheckStatus::Error);
        assert_eq!(
            check_endpoint(&settings, "Courses endpoint", "", ENV_COURSES_ENDPOINT).status,
            CheckStatus::Error
        );
        assert_eq!(check_session(&settings).status, CheckStatus::Error);
    }

    #[test]
    fn test_cookie_check_never_prints_cookie() {
        let mut settings = Settings::default();
        settings.session.cookie = "SESSabcdef0123456789=topsecret".to_string();
        let result = check_cookie(&settings);
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(!result.message.contains("topsecret"));
        assert!(result.message.contains("1 pair(s)"));
    }
}
