//! Configuration module for schoology-mcp.
//!
//! Settings come from an optional TOML file, overridden by `SCHOOLOGY_*`
//! environment variables.

mod settings;

pub use settings::{
    mask_secret, GeneralSettings, HttpSettings, SessionSettings, Settings, ENV_BASE_URL,
    ENV_COOKIE, ENV_COOKIE_FILE, ENV_COURSES_ENDPOINT, ENV_UPCOMING_ENDPOINT,
};
