//! Bounded ReAct loop: DECIDE -> REASON -> ACT -> DECIDE ... -> FINAL_ANSWER.
//!
//! - [`DecideNode`]: routing point; `current_step < max_steps` continues, otherwise the run
//!   moves to the final answer. The entry edge goes here, so `max_steps = 0` reasons zero times.
//! - [`ReasonNode`]: renders the reasoning prompt, calls the model, appends the reply and
//!   counts the step.
//! - [`ActNode`]: parses the latest reply for one `Tool:` call and runs it.
//! - [`FinalAnswerNode`]: renders the final prompt, calls the model once, sets `final_answer`.
//!
//! [`ReactRunner`] compiles these into a graph and runs it per query.

mod act_node;
mod config;
mod decide_node;
mod final_answer_node;
mod parse;
mod reason_node;
mod runner;

pub use act_node::{ActNode, TOOL_RESULT_PREFIX};
pub use config::{AgentConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_MODEL};
pub use decide_node::{route_after_decide, DecideNode};
pub use final_answer_node::FinalAnswerNode;
pub use parse::{final_answer_marker, ToolCall, ToolCallParser, FINAL_ANSWER_MARKER, TOOL_MARKER};
pub use reason_node::ReasonNode;
pub use runner::{ReactOutcome, ReactRunner, RunError};

/// Node ids in the ReAct graph.
pub const DECIDE_NODE: &str = "decide";
pub const REASON_NODE: &str = "reason";
pub const ACT_NODE: &str = "act";
pub const FINAL_ANSWER_NODE: &str = "final_answer";
