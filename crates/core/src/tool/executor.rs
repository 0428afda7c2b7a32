use std::collections::HashMap;

use returns_agent_model::{ModelTool, ToolCallRequest, ToolCallResult};

use crate::tool::{Error, ToolObject};

/// An executor that handles tool call requests from the model.
pub struct Executor {
    tools: HashMap<String, Box<dyn ToolObject>>,
}

impl Executor {
    pub fn with_tools(tools: Vec<Box<dyn ToolObject>>) -> Self {
        let mut tool_map = HashMap::with_capacity(tools.len());
        for tool in tools {
            let name = tool.name();
            tool_map.insert(name.to_owned(), tool);
        }
        let tools = tool_map;
        Self { tools }
    }

    pub fn definitions(&self) -> Vec<ModelTool> {
        let mut definitions: Vec<ModelTool> = self
            .tools
            .values()
            .map(|tool| ModelTool {
                name: tool.name().to_owned(),
                description: tool.description().trim().to_owned(),
                parameters: tool.parameter_schema().clone(),
            })
            .collect();
        // Stable declaration order across runs.
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Runs a batch of tool call requests sequentially, in request order.
    ///
    /// Every request yields exactly one result, matched by call id. A
    /// failing call is rendered into a descriptive result message and
    /// never aborts its siblings.
    pub async fn run_batch(
        &self,
        requests: &[ToolCallRequest],
    ) -> Vec<ToolCallResult> {
        let mut results = Vec::with_capacity(requests.len());
        for req in requests {
            trace!(
                "running a tool ({}) with args: {:?}",
                req.id, req.arguments
            );
            let outcome = match self.tools.get(&req.name) {
                Some(tool) => tool.execute(req.arguments.clone()).await,
                None => {
                    warn!("tool not found: {}", req.name);
                    Err(Error::not_found()
                        .with_reason(format!("no tool named `{}`", req.name)))
                }
            };
            let content = match outcome {
                Ok(content) => content,
                Err(err) => {
                    format!("Error executing {}: {}", req.name, err.reason())
                }
            };
            results.push(ToolCallResult {
                id: req.id.clone(),
                content,
            });
        }
        results
    }
}
