//! Tool-call extraction from free-form model output.
//!
//! Grammar, line oriented:
//!
//! - The first line whose trimmed form starts with `Tool:` and splits on `:` into three parts
//!   declares a call. Name is the second part, arguments the third (both trimmed). The split
//!   stops at three parts, so colons inside the arguments survive.
//! - A `Tool:` line with no second `:` is the two-line form when the next line starts with
//!   `Args:`; otherwise it is ignored and scanning continues.
//! - A declaration with an empty name is ignored.
//! - Only the first declaration counts. No declaration means no tool call.
//!
//! Whether the tool exists is the registry's business, not the parser's.

pub const TOOL_MARKER: &str = "Tool:";
pub const ARGS_MARKER: &str = "Args:";
pub const FINAL_ANSWER_MARKER: &str = "FINAL_ANSWER:";

/// A parsed tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub name: String,
    pub args: String,
}

/// Extracts at most one [`ToolCall`] from assistant text.
pub struct ToolCallParser;

impl ToolCallParser {
    pub fn parse(text: &str) -> Option<ToolCall> {
        let lines: Vec<&str> = text.lines().collect();
        for (i, line) in lines.iter().enumerate() {
            let trimmed = line.trim();
            if !trimmed.starts_with(TOOL_MARKER) {
                continue;
            }
            let mut parts = trimmed.splitn(3, ':');
            parts.next();
            let name = parts.next().map(str::trim).unwrap_or_default();
            if name.is_empty() {
                continue;
            }
            let args = match parts.next() {
                Some(args) => args.trim(),
                None => match lines
                    .get(i + 1)
                    .and_then(|next| next.trim().strip_prefix(ARGS_MARKER))
                {
                    Some(args) => args.trim(),
                    None => continue,
                },
            };
            return Some(ToolCall {
                name: name.to_string(),
                args: args.to_string(),
            });
        }
        None
    }
}

/// Text after the first `FINAL_ANSWER:` line, if the model wrote one.
pub fn final_answer_marker(text: &str) -> Option<&str> {
    text.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(FINAL_ANSWER_MARKER))
        .map(str::trim)
}
