//! Node-level tests for the ReAct graph: REASON, ACT, DECIDE, FINAL_ANSWER in isolation.


use std::sync::Arc;

use async_trait::async_trait;
use harper::agent::react::{
    ActNode, DecideNode, FinalAnswerNode, ReasonNode, TOOL_RESULT_PREFIX,
};
use harper::graph::{Next, Node};
use harper::tools::{CalculatorTool, Tool, ToolError, ToolRegistry, ToolSpec};
use harper::{AgentError, ConversationState, Message, MockFailure, MockLlm, PromptBuilder};

fn calculator_registry() -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(CalculatorTool));
    Arc::new(registry)
}

fn prompts_for(registry: &ToolRegistry) -> Arc<PromptBuilder> {
    Arc::new(PromptBuilder::from_registry(registry))
}

/// Tool that breaks the contract by returning Err.
struct BrokenTool;

#[async_trait]
impl Tool for BrokenTool {
    fn name(&self) -> &str {
        "broken"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "broken".into(),
            description: "Always errors".into(),
            input: "anything".into(),
        }
    }

    async fn call(&self, _args: &str) -> Result<String, ToolError> {
        Err(ToolError::ContractViolation {
            tool: "broken".into(),
            message: "backend exploded".into(),
        })
    }
}

/// **Scenario**: REASON appends the model reply as an assistant entry and increments the step.
#[tokio::test]
async fn reason_appends_reply_and_counts_step() {
    let registry = calculator_registry();
    let llm = Arc::new(MockLlm::with_reply("Tool: calculator: 2+2"));
    let node = ReasonNode::new(llm.clone(), prompts_for(&registry), 0.2);

    let state = ConversationState::new("What is 2+2?", 3);
    let (out, next) = node.run(state).await.unwrap();

    assert_eq!(next, Next::Continue);
    assert_eq!(out.current_step, 1);
    assert_eq!(out.messages.last(), Some(&Message::assistant("Tool: calculator: 2+2")));
    assert!(out.tool_results.is_empty());

    let prompt = llm.last_prompt_text().expect("prompt recorded");
    assert!(prompt.contains("user: What is 2+2?"), "{}", prompt);
    assert!(prompt.contains("- calculator:"), "{}", prompt);
    assert!(prompt.contains("Current step: 1 of 3"), "{}", prompt);
}

/// **Scenario**: A model failure in REASON propagates and is not retried.
#[tokio::test]
async fn reason_model_failure_propagates() {
    let registry = calculator_registry();
    let llm = Arc::new(MockLlm::failing(MockFailure::Provider("upstream 500".into())));
    let node = ReasonNode::new(llm.clone(), prompts_for(&registry), 0.2);

    let err = node
        .run(ConversationState::new("q", 3))
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Llm(_)), "{:?}", err);
    assert_eq!(llm.call_count(), 1);
}

/// **Scenario**: ACT runs a recognised tool, records the triple and adds a prefixed observation.
#[tokio::test]
async fn act_runs_tool_and_records_result() {
    let node = ActNode::new(calculator_registry());
    let mut state = ConversationState::new("What is 2+2?", 3);
    state.messages.push(Message::assistant("Let me compute.\nTool: calculator: 2+2"));
    state.current_step = 1;

    let (out, next) = node.run(state).await.unwrap();
    assert_eq!(next, Next::Continue);
    assert_eq!(out.tool_results.len(), 1);
    assert_eq!(out.tool_results[0].name, "calculator");
    assert_eq!(out.tool_results[0].input, "2+2");
    assert_eq!(out.tool_results[0].output, "4");
    assert_eq!(
        out.messages.last(),
        Some(&Message::observation(format!("{}4", TOOL_RESULT_PREFIX)))
    );
    assert_eq!(out.current_step, 1);
}

/// **Scenario**: ACT with an unknown tool adds an observation naming it and does not fail.
#[tokio::test]
async fn act_unknown_tool_becomes_observation() {
    let node = ActNode::new(calculator_registry());
    let mut state = ConversationState::new("q", 3);
    state.messages.push(Message::assistant("Tool: teleport: Mars"));

    let (out, next) = node.run(state).await.unwrap();
    assert_eq!(next, Next::Continue);
    assert!(out.tool_results.is_empty());
    match out.messages.last() {
        Some(Message::Observation(text)) => {
            assert!(text.contains("teleport"), "{}", text);
            assert!(text.contains("calculator"), "{}", text);
        }
        other => panic!("expected observation, got {:?}", other),
    }
}

/// **Scenario**: ACT without a tool call leaves the state untouched.
#[tokio::test]
async fn act_without_tool_call_is_noop() {
    let node = ActNode::new(calculator_registry());
    let mut state = ConversationState::new("q", 3);
    state.messages.push(Message::assistant("FINAL_ANSWER: 42"));
    let before = state.clone();

    let (out, _) = node.run(state).await.unwrap();
    assert_eq!(out, before);
}

/// **Scenario**: A tool returning Err is a contract violation and fails the step.
#[tokio::test]
async fn act_contract_violation_is_fatal() {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(BrokenTool));
    let node = ActNode::new(Arc::new(registry));
    let mut state = ConversationState::new("q", 3);
    state.messages.push(Message::assistant("Tool: broken: now"));

    match node.run(state).await {
        Err(AgentError::Tool(ToolError::ContractViolation { tool, .. })) => assert_eq!(tool, "broken"),
        other => panic!("expected contract violation, got {:?}", other.map(|(s, _)| s)),
    }
}

/// **Scenario**: DECIDE never mutates state.
#[tokio::test]
async fn decide_is_pure() {
    let mut state = ConversationState::new("q", 2);
    state.messages.push(Message::assistant("thinking"));
    state.current_step = 1;
    let before = state.clone();
    let (out, next) = DecideNode.run(state).await.unwrap();
    assert_eq!(out, before);
    assert_eq!(next, Next::Continue);
}

/// **Scenario**: FINAL_ANSWER sets the answer from a prompt carrying transcript and tool results.
#[tokio::test]
async fn final_answer_sets_answer() {
    let registry = calculator_registry();
    let llm = Arc::new(MockLlm::with_reply("2+2 is 4."));
    let node = FinalAnswerNode::new(llm.clone(), prompts_for(&registry), 0.2);

    let mut state = ConversationState::new("What is 2+2?", 1);
    state.messages.push(Message::assistant("Tool: calculator: 2+2"));
    state.messages.push(Message::observation("Tool result: 4"));
    state.tool_results.push(harper::ToolRecord {
        name: "calculator".into(),
        input: "2+2".into(),
        output: "4".into(),
    });
    state.current_step = 1;

    let (out, next) = node.run(state).await.unwrap();
    assert_eq!(next, Next::End);
    assert_eq!(out.final_answer.as_deref(), Some("2+2 is 4."));

    let prompt = llm.last_prompt_text().unwrap();
    assert!(prompt.contains("- calculator(2+2) -> 4"), "{}", prompt);
    assert!(prompt.contains("observation: Tool result: 4"), "{}", prompt);
}
