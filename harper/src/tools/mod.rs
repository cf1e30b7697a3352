//! Tools the agent can call, and the registry that dispatches them.
//!
//! Tools take the raw argument text from the model's `Tool:` line and return text. A tool
//! reports its own failures as text (`Search failed: ...`, `Calculation error: ...`); an `Err`
//! from [`Tool::call`] means the tool broke its contract and ends the run.

mod calculator;
mod clock;
mod error;
mod registry;
mod search;
mod r#trait;
mod weather;

pub use calculator::{CalculatorTool, TOOL_CALCULATOR};
pub use clock::{CurrentTimeTool, TIME_FORMAT, TOOL_GET_CURRENT_TIME};
pub use error::ToolError;
pub use r#trait::{Tool, ToolSpec};
pub use registry::ToolRegistry;
pub use search::{SearchSettings, SearchWebTool, DEFAULT_TAVILY_BASE_URL, TOOL_SEARCH_WEB};
pub use weather::{WeatherLookupTool, TOOL_WEATHER_LOOKUP};
