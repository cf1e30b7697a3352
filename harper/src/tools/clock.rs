//! Current local time.

use async_trait::async_trait;
use chrono::Local;

use super::{Tool, ToolError, ToolSpec};

pub const TOOL_GET_CURRENT_TIME: &str = "get_current_time";

/// `YYYY-MM-DD HH:MM:SS`.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Returns the local time; any argument text is ignored.
pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        TOOL_GET_CURRENT_TIME
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_GET_CURRENT_TIME.to_string(),
            description: "Get the current date and time".to_string(),
            input: "none".to_string(),
        }
    }

    async fn call(&self, _args: &str) -> Result<String, ToolError> {
        Ok(Local::now().format(TIME_FORMAT).to_string())
    }
}
