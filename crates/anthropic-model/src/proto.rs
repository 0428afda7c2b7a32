use returns_agent_model::{
    ModelFinishReason, ModelMessage, ModelRequest, ModelTool, ModelTurn,
    ToolCallRequest,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::AnthropicConfig;

// ----------------------------
// Types shared with the server
// ----------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct ToolDefinition {
    name: String,
    description: String,
    input_schema: Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessagesRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ToolDefinition>,
}

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<String>,
}

// -----------
// Conversions
// -----------

pub fn create_request(
    req: &ModelRequest,
    config: &AnthropicConfig,
) -> MessagesRequest {
    let mut system: Option<String> = None;
    let mut messages: Vec<Message> = Vec::with_capacity(req.messages.len());

    for msg in &req.messages {
        match msg {
            ModelMessage::System(content) => match &mut system {
                Some(system) => {
                    system.push_str("\n\n");
                    system.push_str(content);
                }
                None => system = Some(content.clone()),
            },
            ModelMessage::User(content) => messages.push(Message {
                role: Role::User,
                content: vec![ContentBlock::Text {
                    text: content.clone(),
                }],
            }),
            ModelMessage::Assistant(content) => messages.push(Message {
                role: Role::Assistant,
                content: vec![ContentBlock::Text {
                    text: content.clone(),
                }],
            }),
            ModelMessage::ToolRequest(request) => {
                let mut content = Vec::with_capacity(request.calls.len() + 1);
                if let Some(text) = &request.text {
                    content.push(ContentBlock::Text { text: text.clone() });
                }
                for call in &request.calls {
                    content.push(ContentBlock::ToolUse {
                        id: call.id.clone(),
                        name: call.name.clone(),
                        input: call.arguments.clone(),
                    });
                }
                messages.push(Message {
                    role: Role::Assistant,
                    content,
                });
            }
            ModelMessage::Tool(result) => {
                let block = ContentBlock::ToolResult {
                    tool_use_id: result.id.clone(),
                    content: result.content.clone(),
                };
                // The API expects all results of one batch in a single
                // user message, so consecutive tool results coalesce.
                match messages.last_mut() {
                    Some(last)
                        if last.role == Role::User
                            && last.content.iter().all(|b| {
                                matches!(b, ContentBlock::ToolResult { .. })
                            }) =>
                    {
                        last.content.push(block);
                    }
                    _ => messages.push(Message {
                        role: Role::User,
                        content: vec![block],
                    }),
                }
            }
        }
    }

    MessagesRequest {
        model: config.model.clone(),
        max_tokens: config.max_tokens,
        system,
        messages,
        tools: req.tools.iter().map(create_tool).collect(),
    }
}

#[inline]
fn create_tool(tool: &ModelTool) -> ToolDefinition {
    ToolDefinition {
        name: tool.name.clone(),
        description: tool.description.clone(),
        input_schema: tool.parameters.clone(),
    }
}

pub fn into_model_turn(resp: MessagesResponse) -> ModelTurn {
    let mut text = String::new();
    let mut tool_calls = Vec::new();

    for block in resp.content {
        match block {
            ContentBlock::Text { text: chunk } => text.push_str(&chunk),
            ContentBlock::ToolUse { id, name, input } => {
                tool_calls.push(ToolCallRequest {
                    id,
                    name,
                    arguments: input,
                });
            }
            ContentBlock::ToolResult { .. } => {}
        }
    }

    let finish_reason = if resp.stop_reason.as_deref() == Some("tool_use")
        || !tool_calls.is_empty()
    {
        ModelFinishReason::ToolCalls
    } else {
        ModelFinishReason::Stop
    };

    ModelTurn {
        text,
        tool_calls,
        finish_reason,
    }
}
