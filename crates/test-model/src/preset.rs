use returns_agent_model::{
    ErrorKind, ModelFinishReason, ModelTurn, ToolCallRequest,
};
use serde_json::Value;

/// A scripted assistant turn.
#[derive(Clone, Debug)]
pub enum PresetTurn {
    /// A plain text answer that ends the loop run.
    Answer(String),
    /// A turn that requests tool invocations, with an optional
    /// reasoning preamble.
    ToolCalls {
        text: String,
        calls: Vec<ToolCallRequest>,
    },
    /// The request fails with the given error kind.
    Failure(ErrorKind),
}

impl PresetTurn {
    /// Creates a plain answer turn.
    #[inline]
    pub fn answer(text: impl Into<String>) -> Self {
        PresetTurn::Answer(text.into())
    }

    /// Creates a turn with a single tool call and no preamble.
    #[inline]
    pub fn tool_call(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: Value,
    ) -> Self {
        PresetTurn::ToolCalls {
            text: String::new(),
            calls: vec![ToolCallRequest {
                id: id.into(),
                name: name.into(),
                arguments,
            }],
        }
    }

    pub(crate) fn into_model_turn(self) -> ModelTurn {
        match self {
            PresetTurn::Answer(text) => ModelTurn {
                text,
                tool_calls: vec![],
                finish_reason: ModelFinishReason::Stop,
            },
            PresetTurn::ToolCalls { text, calls } => ModelTurn {
                text,
                tool_calls: calls,
                finish_reason: ModelFinishReason::ToolCalls,
            },
            PresetTurn::Failure(_) => {
                unreachable!("failure turns never produce a model turn")
            }
        }
    }
}
