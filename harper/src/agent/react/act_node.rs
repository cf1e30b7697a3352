//! ACT: run the tool named in the latest reply, if any.
//!
//! Unknown tools become an observation and the run continues. A tool that returns `Err`
//! broke its contract and fails the run.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, trace, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::Message;
use crate::state::{ConversationState, ToolRecord};
use crate::tools::{ToolError, ToolRegistry};

use super::{ToolCallParser, ACT_NODE};

/// Prefix of every successful tool observation.
pub const TOOL_RESULT_PREFIX: &str = "Tool result: ";

const LOG_PREVIEW_CHARS: usize = 200;

fn truncate_for_log(s: &str) -> String {
    if s.chars().count() <= LOG_PREVIEW_CHARS {
        s.to_string()
    } else {
        let head: String = s.chars().take(LOG_PREVIEW_CHARS).collect();
        format!("{}...", head)
    }
}

pub struct ActNode {
    tools: Arc<ToolRegistry>,
}

impl ActNode {
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        Self { tools }
    }

    fn unknown_tool_observation(&self, name: &str) -> String {
        format!(
            "Tool error: unknown tool '{}'. Available tools: {}",
            name,
            self.tools.names().join(", ")
        )
    }
}

#[async_trait]
impl Node<ConversationState> for ActNode {
    fn id(&self) -> &str {
        ACT_NODE
    }

    async fn run(
        &self,
        mut state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        let Some(call) = state.last_assistant_reply().and_then(ToolCallParser::parse) else {
            debug!(step = state.current_step, "no tool call in reply");
            return Ok((state, Next::Continue));
        };

        debug!(tool = %call.name, args = %truncate_for_log(&call.args), "Calling tool");
        match self.tools.invoke(&call.name, &call.args).await {
            Ok(output) => {
                trace!(tool = %call.name, output = %truncate_for_log(&output), "Tool returned");
                state
                    .messages
                    .push(Message::Observation(format!("{}{}", TOOL_RESULT_PREFIX, output)));
                state.tool_results.push(ToolRecord {
                    name: call.name,
                    input: call.args,
                    output,
                });
            }
            Err(ToolError::UnknownTool(name)) => {
                warn!(tool = %name, "model requested an unknown tool");
                let observation = self.unknown_tool_observation(&name);
                state.messages.push(Message::Observation(observation));
            }
            Err(e) => {
                warn!(tool = %call.name, error = %e, "tool broke its contract");
                return Err(AgentError::Tool(e));
            }
        }
        Ok((state, Next::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_for_log_keeps_short_and_cuts_long() {
        assert_eq!(truncate_for_log("short"), "short");
        let long = "x".repeat(300);
        let cut = truncate_for_log(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), LOG_PREVIEW_CHARS + 3);
    }
}
