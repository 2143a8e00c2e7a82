//! schoology-mcp - Schoology as agent tools
//!
//! Exposes a student's enrolled courses and upcoming assignments from
//! Schoology, which has no student-facing API, as read-only tools for LLM
//! agents. Requests borrow an authenticated browser session: the operator
//! supplies the `Cookie` header of a logged-in tab and refreshes it when it
//! expires.
//!
//! # Architecture
//!
//! - `session` - Immutable cookie and endpoint URLs
//! - `client` - One authenticated GET per call, with failure classification
//! - `normalize` - Defensive parsing of course and assignment payloads
//! - `tools` - The three tool operations
//! - `mcp` - JSON-RPC 2.0 server over stdio
//! - `config` - TOML and environment configuration
//! - `cli` - Command line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use schoology_mcp::config::Settings;
//! use schoology_mcp::tools::SchoologyTools;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let tools = SchoologyTools::from_settings(&settings)?;
//!
//!     for course in tools.get_enrolled_courses().await? {
//!         println!("{} ({})", course.title, course.id);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod mcp;
pub mod normalize;
pub mod session;
pub mod tools;

pub use error::{Result, SchoologyError};
