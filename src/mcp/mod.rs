//! MCP (Model Context Protocol) server for schoology-mcp.
//!
//! Lets AI assistants call the Schoology tools.
//! Implements JSON-RPC 2.0 over stdio.

mod protocol;
mod server;
mod tools;

pub use server::McpServer;
