mod builder;

use std::error::Error as StdError;
use std::fmt::{self, Display};

use returns_agent_model::{
    ModelMessage, ModelProviderError, ModelRequest, ToolCallRequest,
    ToolCallResult, ToolRequestMessage,
};

use crate::conversation::Conversation;
use crate::model_client::ModelClient;
use crate::tool::Executor as ToolExecutor;
pub use builder::AgentBuilder;

/// The default bound on model invocations per loop run.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// The stage of the reason/act loop.
///
/// One loop run cycles between invoking the model and executing the
/// tools it requested, until the model produces a plain answer (or the
/// iteration bound trips). `Done` is terminal.
enum LoopStage {
    AwaitingModel,
    AwaitingTools(Vec<ToolCallRequest>),
    Done,
}

/// The outcome of one loop run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The model produced a final answer.
    Answer(String),
    /// The iteration bound tripped before the model stopped requesting
    /// tools; no answer was produced.
    Inconclusive {
        /// The number of model invocations that were made.
        iterations: usize,
    },
}

/// An observable step of a loop run, for presentation purposes only.
///
/// Events are emitted in conversation order and carry no contract
/// beyond that.
#[derive(Clone, Debug)]
pub enum AgentEvent {
    /// The model requested a tool invocation.
    ToolCall(ToolCallRequest),
    /// A tool invocation produced a result.
    ToolResult {
        /// The name of the invoked tool.
        name: String,
        /// The matching result.
        result: ToolCallResult,
    },
    /// The model produced its final answer.
    AssistantText(String),
}

/// An error that occurred while running the agent loop.
///
/// The only fallible collaborator is the model provider; tool failures
/// are rendered into tool results and never surface here.
#[derive(Debug)]
pub struct AgentError {
    source: Box<dyn ModelProviderError>,
}

impl AgentError {
    /// Returns the provider error that caused this error.
    #[inline]
    pub fn provider_error(&self) -> &dyn ModelProviderError {
        &*self.source
    }
}

impl Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model request failed: {}", self.source)
    }
}

impl StdError for AgentError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.source)
    }
}

/// An agent that answers return-support queries by alternating between
/// model inference and tool execution.
///
/// The agent itself is stateless across runs; the conversation is owned
/// by the caller and passed into [`Agent::run_turn`], which appends to
/// it and never removes or reorders turns.
pub struct Agent {
    model_client: ModelClient,
    tool_executor: ToolExecutor,
    system_prompt: Option<String>,
    max_iterations: usize,
    on_event: Option<Box<dyn Fn(&AgentEvent) + Send + Sync>>,
}

impl Agent {
    pub(crate) fn from_builder(builder: AgentBuilder) -> Self {
        let AgentBuilder {
            model_client,
            system_prompt,
            tools,
            max_iterations,
            on_event,
        } = builder;

        Self {
            model_client,
            tool_executor: ToolExecutor::with_tools(tools),
            system_prompt,
            max_iterations,
            on_event,
        }
    }

    /// Runs the loop for one user input, to completion.
    ///
    /// The input is appended to the conversation, then the loop invokes
    /// the model, executes any requested tools, and feeds the results
    /// back until the model answers in plain text. The number of model
    /// invocations is bounded by the configured maximum; exceeding it
    /// yields [`RunOutcome::Inconclusive`] instead of looping forever.
    pub async fn run_turn(
        &self,
        conversation: &mut Conversation,
        input: impl Into<String>,
    ) -> Result<RunOutcome, AgentError> {
        conversation.push(ModelMessage::User(input.into()));

        let mut stage = LoopStage::AwaitingModel;
        let mut iterations = 0usize;
        loop {
            stage = match stage {
                LoopStage::AwaitingModel => {
                    if iterations == self.max_iterations {
                        warn!(
                            "iteration bound reached after {iterations} model \
                             invocations, giving up"
                        );
                        return Ok(RunOutcome::Inconclusive { iterations });
                    }
                    iterations += 1;

                    let request = self.build_model_request(conversation);
                    let turn = self
                        .model_client
                        .send_request(request)
                        .await
                        .map_err(|source| AgentError { source })?;

                    if turn.tool_calls.is_empty() {
                        conversation
                            .push(ModelMessage::Assistant(turn.text.clone()));
                        self.emit(&AgentEvent::AssistantText(turn.text));
                        LoopStage::Done
                    } else {
                        for call in &turn.tool_calls {
                            self.emit(&AgentEvent::ToolCall(call.clone()));
                        }
                        let text = if turn.text.is_empty() {
                            None
                        } else {
                            Some(turn.text)
                        };
                        conversation.push(ModelMessage::ToolRequest(
                            ToolRequestMessage {
                                text,
                                calls: turn.tool_calls.clone(),
                            },
                        ));
                        LoopStage::AwaitingTools(turn.tool_calls)
                    }
                }
                LoopStage::AwaitingTools(calls) => {
                    let results = self.tool_executor.run_batch(&calls).await;
                    for (call, result) in calls.iter().zip(&results) {
                        self.emit(&AgentEvent::ToolResult {
                            name: call.name.clone(),
                            result: result.clone(),
                        });
                    }
                    for result in results {
                        conversation.push(ModelMessage::Tool(result));
                    }
                    LoopStage::AwaitingModel
                }
                LoopStage::Done => break,
            };
        }

        let answer = conversation
            .last_assistant_text()
            .unwrap_or_default()
            .to_owned();
        Ok(RunOutcome::Answer(answer))
    }

    fn build_model_request(&self, conversation: &Conversation) -> ModelRequest {
        let mut messages =
            Vec::with_capacity(conversation.len() + 1);
        if let Some(prompt) = &self.system_prompt {
            messages.push(ModelMessage::System(prompt.clone()));
        }
        messages.extend(conversation.turns().iter().cloned());
        ModelRequest {
            messages,
            tools: self.tool_executor.definitions(),
        }
    }

    #[inline]
    fn emit(&self, event: &AgentEvent) {
        if let Some(on_event) = &self.on_event {
            on_event(event);
        }
    }
}
