use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The reason why a model turn has finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelFinishReason {
    /// The model needs to call one or more tools.
    ToolCalls,
    /// The model has finished generating text.
    Stop,
}

/// Describes a tool call request from the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// The unique identifier for the tool call request.
    pub id: String,
    /// The name of the tool to call.
    pub name: String,
    /// The arguments to pass to the tool, a mapping of parameter name
    /// to value.
    pub arguments: Value,
}

/// A fully received assistant turn from the model provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelTurn {
    /// The text the model produced. When the turn also carries tool
    /// calls, this is the reasoning preamble and may be empty.
    pub text: String,
    /// Tool calls requested by the model, in emission order.
    pub tool_calls: Vec<ToolCallRequest>,
    /// The reason the model finished generating.
    pub finish_reason: ModelFinishReason,
}

impl ModelTurn {
    /// Returns `true` if this turn requests any tool invocations.
    #[inline]
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}
