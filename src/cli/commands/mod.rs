//! CLI command implementations.

mod assignments;
mod config;
mod courses;
mod date;
mod doctor;
mod mcp;

pub use assignments::run_assignments;
pub use config::run_config;
pub use courses::run_courses;
pub use date::run_date;
pub use doctor::run_doctor;
pub use mcp::run_mcp;
