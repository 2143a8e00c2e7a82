//! CLI module for schoology-mcp.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// schoology-mcp - Schoology courses and assignments as agent tools
///
/// Serves an MCP server over stdio by default. Authentication is a cookie
/// copied from a logged-in browser session (SCHOOLOGY_COOKIE).
#[derive(Parser, Debug)]
#[command(name = "schoology-mcp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SCHOOLOGY_MCP_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start MCP server for AI assistant integration (default)
    Mcp,

    /// List enrolled courses
    Courses {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List upcoming assignments
    Assignments {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the current date and time
    Date,

    /// Check configuration without contacting Schoology
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration (cookie masked)
    Show,

    /// Show configuration file path
    Path,
}
