//! Placeholder weather lookup (no backend).

use async_trait::async_trait;

use super::{Tool, ToolError, ToolSpec};

pub const TOOL_WEATHER_LOOKUP: &str = "weather_lookup";

pub struct WeatherLookupTool;

#[async_trait]
impl Tool for WeatherLookupTool {
    fn name(&self) -> &str {
        TOOL_WEATHER_LOOKUP
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_WEATHER_LOOKUP.to_string(),
            description: "Get weather information for a city".to_string(),
            input: "city name".to_string(),
        }
    }

    async fn call(&self, args: &str) -> Result<String, ToolError> {
        Ok(format!(
            "Weather information for {}: This is a placeholder. In a real implementation, \
             you would integrate with a weather API like OpenWeatherMap.",
            args.trim()
        ))
    }
}
