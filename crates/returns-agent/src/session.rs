use std::sync::Arc;

use chrono::Local;
use returns_agent_core::conversation::Conversation;
use returns_agent_core::{
    Agent, AgentBuilder, AgentError, AgentEvent, RunOutcome,
};
use returns_agent_model::ModelProvider;

use crate::store::OrderStore;
use crate::tools::{CalculateRefundTool, LookupOrderTool, ReturnPolicyTool};

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    agent_builder: AgentBuilder,
    store: Option<Arc<OrderStore>>,
}

impl SessionBuilder {
    /// Creates a session builder with a specified model provider.
    pub fn with_model_provider<M: ModelProvider + 'static>(
        provider: M,
    ) -> Self {
        let agent_builder = AgentBuilder::with_model_provider(provider);
        Self {
            agent_builder,
            store: None,
        }
    }

    /// Uses the given order store instead of the default mock data.
    #[inline]
    pub fn with_order_store(mut self, store: Arc<OrderStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Bounds the number of model invocations per user message.
    #[inline]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.agent_builder =
            self.agent_builder.with_max_iterations(max_iterations);
        self
    }

    /// Attaches a callback to be invoked for each observable loop step.
    #[inline]
    pub fn on_event(
        mut self,
        on_event: impl Fn(&AgentEvent) + Send + Sync + 'static,
    ) -> Self {
        self.agent_builder = self.agent_builder.on_event(on_event);
        self
    }

    /// Builds a new session.
    pub fn build(self) -> Session {
        let store =
            self.store.unwrap_or_else(|| Arc::new(OrderStore::mock()));

        let system_prompt = include_str!("./system_prompt.md").replace(
            "{{CURRENT_DATE}}",
            &Local::now().date_naive().to_string(),
        );

        let agent = self
            .agent_builder
            .with_system_prompt(system_prompt)
            .with_tool(LookupOrderTool::new(Arc::clone(&store)))
            .with_tool(ReturnPolicyTool::new())
            .with_tool(CalculateRefundTool::new(Arc::clone(&store)))
            .build();

        Session {
            agent,
            conversation: Conversation::new(),
            store,
        }
    }
}

/// A return-support chat session.
///
/// The session owns the growing conversation and threads it through
/// every loop run, so successive messages share context. Create a fresh
/// session per query for one-shot usage.
pub struct Session {
    agent: Agent,
    conversation: Conversation,
    store: Arc<OrderStore>,
}

impl Session {
    /// Sends a user message and runs the loop to completion.
    pub async fn send_message(
        &mut self,
        message: &str,
    ) -> Result<RunOutcome, AgentError> {
        self.agent.run_turn(&mut self.conversation, message).await
    }

    /// Returns the conversation so far.
    #[inline]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Returns the order store backing this session's tools.
    #[inline]
    pub fn order_store(&self) -> &OrderStore {
        &self.store
    }
}
