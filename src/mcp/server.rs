//! MCP server implementation.

use super::protocol::*;
use super::tools::get_tools;
use crate::tools::{parse_tool_call, SchoologyTools, ToolCall};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "schoology-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server for schoology-mcp.
pub struct McpServer {
    tools: SchoologyTools,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(tools: SchoologyTools) -> Self {
        Self { tools }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&self) -> anyhow::Result<()> {
        info!("schoology-mcp server starting");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await?;
        info!("Shutting down...");
        Ok(())
    }

    /// Serve newline-delimited JSON-RPC messages until `reader` closes.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = reader;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => match parse_message(line) {
                    Ok(request) => self.handle_request(request).await,
                    Err(response) => Some(response),
                },
                Err(e) => {
                    warn!("Request is not valid UTF-8: {}", e);
                    Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"))
                }
            };

            if let Some(response) = response {
                let mut out = serde_json::to_string(&response)?;
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        Ok(())
    }

    /// Handle a single JSON-RPC message. Notifications (no `id` member) get no response.
    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.id.is_none() {
            debug!("Notification: {}", request.method);
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    /// Handle initialize request.
    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        respond(id, &result)
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        respond(id, &ToolsListResult { tools: get_tools() })
    }

    /// Handle tools/call request.
    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        &format!("Invalid params: {}", e),
                    )
                }
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        let result = match parse_tool_call(&params.name) {
            Ok(tool) => self.call_tool(tool).await,
            Err(e) => ToolCallResult::error(e.to_string()),
        };

        respond(id, &result)
    }

    async fn call_tool(&self, tool: ToolCall) -> ToolCallResult {
        match self.tools.execute(tool).await {
            Ok(Value::String(text)) => ToolCallResult::text(text),
            Ok(value) => match serde_json::to_string_pretty(&value) {
                Ok(text) => ToolCallResult::text(text),
                Err(e) => ToolCallResult::error(format!("Failed to serialize result: {}", e)),
            },
            Err(e) => {
                warn!(status = ?e.status(), "{} failed: {}", tool.name(), e);
                if e.is_authentication() {
                    warn!("Session cookie rejected; it has to be refreshed from the browser");
                }
                ToolCallResult::error(e.to_string())
            }
        }
    }
}

/// Parse one line into a request, or the error response it deserves.
///
/// A present `"id": null` is kept as `Some(Value::Null)` so it is answered
/// like any other request; only a missing `id` marks a notification.
fn parse_message(line: &str) -> std::result::Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_str(line).map_err(|e| {
        warn!("Failed to parse request: {}", e);
        JsonRpcResponse::error(None, PARSE_ERROR, "Parse error")
    })?;

    let id = value.get("id").cloned();
    let mut request: JsonRpcRequest = serde_json::from_value(value).map_err(|e| {
        warn!("Invalid request: {}", e);
        JsonRpcResponse::error(id.clone(), INVALID_REQUEST, "Invalid Request")
    })?;
    request.id = id;
    Ok(request)
}

fn respond<T: serde::Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, -32603, &format!("Internal error: {}", e)),
    }
}
