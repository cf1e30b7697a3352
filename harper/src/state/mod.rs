//! State threaded through the ReAct graph.
//!
//! [`ConversationState`] is created per request, passed by value into each node, and dropped
//! once the final answer is returned. Nothing in it is shared between runs.
//!
//! # Example
//!
//! ```rust
//! use harper::{ConversationState, Message};
//!
//! let state = ConversationState::new("What is 2+2?", 3);
//! assert_eq!(state.messages, vec![Message::user("What is 2+2?")]);
//! assert_eq!(state.current_step, 0);
//! ```

pub mod conversation;

pub use conversation::{ConversationState, ToolRecord};
