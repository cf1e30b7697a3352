//! End-to-end runs of the compiled ReAct graph with a scripted model.


use std::sync::Arc;

use async_trait::async_trait;
use harper::tools::{CalculatorTool, WeatherLookupTool};
use harper::{
    AgentConfig, AgentError, LlmError, Message, MockFailure, MockLlm, PromptBuilder, ReactRunner,
    RunError, Tool, ToolError, ToolRegistry, ToolSpec,
};

fn registry() -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(CalculatorTool));
    registry.register(Box::new(WeatherLookupTool));
    Arc::new(registry)
}

fn runner(llm: Arc<MockLlm>, config: AgentConfig) -> ReactRunner {
    let tools = registry();
    let prompts = Arc::new(PromptBuilder::from_registry(&tools));
    ReactRunner::new(llm, tools, prompts, config).expect("react graph compiles")
}

/// **Scenario**: With max_iterations N the model is called N times for reasoning plus once
/// for the final answer, and the final step count is N.
#[tokio::test]
async fn runs_exactly_max_iterations_cycles() {
    for n in [1u32, 2, 3, 5] {
        let llm = Arc::new(MockLlm::with_reply("Thinking it over."));
        let runner = runner(llm.clone(), AgentConfig::default().with_max_iterations(n));

        let state = runner.invoke("hello").await.unwrap();
        assert_eq!(state.current_step, n);
        assert_eq!(llm.call_count(), n as usize + 1);
        assert_eq!(state.final_answer.as_deref(), Some("Thinking it over."));
        assert_eq!(state.reasoning_steps().len(), n as usize);
    }
}

/// **Scenario**: Calculator question: tool result is recorded and reaches the final prompt.
#[tokio::test]
async fn calculator_run_reports_tool_usage() {
    let llm = Arc::new(MockLlm::with_replies([
        "I should compute this.\nTool: calculator: 2+2",
        "FINAL_ANSWER: 4",
        "FINAL_ANSWER: 4",
        "2+2 equals 4.",
    ]));
    let runner = runner(llm.clone(), AgentConfig::default());

    let outcome = runner.run("What is 2+2?").await.unwrap();
    assert_eq!(outcome.answer, "2+2 equals 4.");
    assert_eq!(outcome.tools_used, vec!["calculator".to_string()]);
    assert_eq!(outcome.reasoning_steps.len(), 3);
    assert_eq!(
        outcome.reasoning_steps[0],
        "I should compute this.\nTool: calculator: 2+2"
    );

    let final_prompt = llm.last_prompt_text().unwrap();
    assert!(final_prompt.contains("- calculator(2+2) -> 4"), "{}", final_prompt);
    assert!(final_prompt.contains("observation: Tool result: 4"), "{}", final_prompt);
}

/// **Scenario**: The same tool used twice shows up once in tools_used.
#[tokio::test]
async fn tools_used_is_deduplicated() {
    let llm = Arc::new(MockLlm::with_replies([
        "Tool: calculator: 1+1",
        "Tool: weather_lookup: Paris",
        "Tool: calculator: 3*3",
        "done",
    ]));
    let runner = runner(llm, AgentConfig::default());

    let state = runner.invoke("mixed").await.unwrap();
    assert_eq!(state.tool_results.len(), 3);
    assert_eq!(
        state.tools_used(),
        vec!["calculator".to_string(), "weather_lookup".to_string()]
    );
}

/// **Scenario**: max_iterations 0 skips reasoning and answers from the query alone.
#[tokio::test]
async fn zero_iterations_goes_straight_to_final_answer() {
    let llm = Arc::new(MockLlm::with_reply("Direct answer."));
    let runner = runner(llm.clone(), AgentConfig::default().with_max_iterations(0));

    let outcome = runner.run("quick one").await.unwrap();
    assert_eq!(outcome.answer, "Direct answer.");
    assert!(outcome.reasoning_steps.is_empty());
    assert!(outcome.tools_used.is_empty());
    assert_eq!(llm.call_count(), 1);
}

/// **Scenario**: An unknown tool name does not abort the run.
#[tokio::test]
async fn unknown_tool_does_not_abort() {
    let llm = Arc::new(MockLlm::with_replies(["Tool: teleport: Mars", "final"]));
    let runner = runner(llm.clone(), AgentConfig::default().with_max_iterations(1));

    let state = runner.invoke("go to mars").await.unwrap();
    assert_eq!(state.final_answer.as_deref(), Some("final"));
    assert!(state.tool_results.is_empty());
    assert!(state
        .messages
        .iter()
        .any(|m| matches!(m, Message::Observation(t) if t.contains("teleport"))));
}

/// **Scenario**: A model failure mid-run fails the whole run; nothing is retried.
#[tokio::test]
async fn model_failure_is_fatal() {
    let llm = Arc::new(
        MockLlm::with_reply("thinking").fail_on_call(1, MockFailure::Provider("boom".into())),
    );
    let runner = runner(llm.clone(), AgentConfig::default().with_max_iterations(3));

    let err = runner.run("q").await.unwrap_err();
    match err {
        RunError::Execution(AgentError::Llm(LlmError::Provider { message, .. })) => {
            assert_eq!(message, "boom")
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(llm.call_count(), 2);
}

struct ExplodingTool;

#[async_trait]
impl Tool for ExplodingTool {
    fn name(&self) -> &str {
        "explode"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "explode".into(),
            description: "Fails".into(),
            input: "none".into(),
        }
    }

    async fn call(&self, _args: &str) -> Result<String, ToolError> {
        Err(ToolError::ContractViolation {
            tool: "explode".into(),
            message: "panicked internally".into(),
        })
    }
}

/// **Scenario**: A tool that breaks its contract ends the run with a tool error.
#[tokio::test]
async fn contract_violation_is_fatal() {
    let mut tools = ToolRegistry::new();
    tools.register(Box::new(ExplodingTool));
    let tools = Arc::new(tools);
    let prompts = Arc::new(PromptBuilder::from_registry(&tools));
    let llm = Arc::new(MockLlm::with_reply("Tool: explode: now"));
    let runner = ReactRunner::new(llm.clone(), tools, prompts, AgentConfig::default()).unwrap();

    let err = runner.run("q").await.unwrap_err();
    assert!(
        matches!(err, RunError::Execution(AgentError::Tool(_))),
        "{:?}",
        err
    );
    assert_eq!(llm.call_count(), 1);
}

/// **Scenario**: With stop_on_final_answer, a FINAL_ANSWER reply without a tool call ends
/// the loop early.
#[tokio::test]
async fn early_stop_when_enabled() {
    let llm = Arc::new(MockLlm::with_replies(["FINAL_ANSWER: 42", "The answer is 42."]));
    let runner = runner(
        llm.clone(),
        AgentConfig::default()
            .with_max_iterations(5)
            .with_stop_on_final_answer(true),
    );

    let state = runner.invoke("meaning of life").await.unwrap();
    assert_eq!(state.current_step, 1);
    assert_eq!(llm.call_count(), 2);
    assert_eq!(state.final_answer.as_deref(), Some("The answer is 42."));
}

/// **Scenario**: Two runs at once keep separate state.
#[tokio::test]
async fn concurrent_runs_are_isolated() {
    let llm_a = Arc::new(MockLlm::with_replies(["Tool: calculator: 6*7", "answer A"]));
    let llm_b = Arc::new(MockLlm::with_replies(["Tool: weather_lookup: Oslo", "answer B"]));
    let runner_a = runner(llm_a, AgentConfig::default().with_max_iterations(1));
    let runner_b = runner(llm_b, AgentConfig::default().with_max_iterations(1));

    let (a, b) = tokio::join!(runner_a.run("query a"), runner_b.run("query b"));
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.answer, "answer A");
    assert_eq!(a.tools_used, vec!["calculator".to_string()]);
    assert_eq!(b.answer, "answer B");
    assert_eq!(b.tools_used, vec!["weather_lookup".to_string()]);
}

/// **Scenario**: One runner serves concurrent queries; each query sees its own transcript.
#[tokio::test]
async fn shared_runner_keeps_queries_apart() {
    let llm = Arc::new(MockLlm::with_reply("ok"));
    let runner = Arc::new(runner(llm, AgentConfig::default().with_max_iterations(2)));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let runner = Arc::clone(&runner);
            tokio::spawn(async move { runner.invoke(&format!("query {}", i)).await })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let state = handle.await.unwrap().unwrap();
        assert_eq!(state.messages[0], Message::user(format!("query {}", i)));
        assert_eq!(state.current_step, 2);
        assert_eq!(state.messages.len(), 3);
    }
}
