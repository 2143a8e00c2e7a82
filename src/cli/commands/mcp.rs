//! MCP command implementation.

use crate::config::Settings;
use crate::mcp::McpServer;
use crate::tools::SchoologyTools;
use anyhow::Result;

/// Run the MCP server.
pub async fn run_mcp(settings: &Settings) -> Result<()> {
    let tools = SchoologyTools::from_settings(settings).map_err(|e| {
        tracing::error!("Failed to configure Schoology session: {}", e);
        e
    })?;
    let server = McpServer::new(tools);
    server.run().await
}
