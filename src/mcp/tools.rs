//! MCP tool definitions for schoology-mcp.

use super::protocol::Tool;
use crate::tools::ToolCall;
use serde_json::json;

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    ToolCall::ALL
        .into_iter()
        .map(|tool| Tool {
            name: tool.name().to_string(),
            description: description(tool).to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        })
        .collect()
}

fn description(tool: ToolCall) -> &'static str {
    match tool {
        ToolCall::GetCurrentDate => {
            "Returns the current date and time in the format YYYY-MM-DD HH:MM:SS. \
             Use it to judge how soon an assignment is due."
        }
        ToolCall::GetEnrolledCourses => {
            "Retrieve the courses the student is enrolled in from Schoology. \
             Returns a JSON array of {id, title, section?}."
        }
        ToolCall::GetUpcomingAssignments => {
            "Retrieve upcoming assignments from Schoology. \
             Returns a JSON array of {title, course?, courseId?, dueAt} in the order Schoology lists them."
        }
    }
}
