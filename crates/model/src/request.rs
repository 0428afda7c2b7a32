use serde_json::Value;

use crate::response::ToolCallRequest;

/// A request to be sent to the model provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelRequest {
    /// The input messages.
    pub messages: Vec<ModelMessage>,
    /// Tools that are available to the model.
    pub tools: Vec<ModelTool>,
}

/// A complete message in a conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelMessage {
    /// The system instructions.
    System(String),
    /// A user input text.
    User(String),
    /// An assistant text, the final answer of one loop run.
    Assistant(String),
    /// A request from the assistant to invoke one or more tools.
    ToolRequest(ToolRequestMessage),
    /// A tool call result.
    Tool(ToolCallResult),
}

/// An assistant message that requests tool invocations.
///
/// The model may emit some reasoning text before deciding to act, which
/// is carried alongside the calls so that the history round-trips to the
/// provider unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolRequestMessage {
    /// The reasoning text preceding the tool calls, if any.
    pub text: Option<String>,
    /// The requested tool calls, in the order the model emitted them.
    pub calls: Vec<ToolCallRequest>,
}

/// The result of calling a tool.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ToolCallResult {
    /// The unique identifier for the tool call request this result
    /// responds to.
    pub id: String,
    /// The result of the tool call.
    pub content: String,
}

/// Describes a tool that can be used by the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelTool {
    /// Name of the tool.
    pub name: String,
    /// Description of the tool.
    pub description: String,
    /// Parameters definition of the tool.
    ///
    /// For most model providers, the parameters should typically be
    /// defined by a [JSON schema](https://json-schema.org/).
    pub parameters: Value,
}
