//! A local fake model for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::future::ready;
use std::sync::{Arc, Mutex};

use returns_agent_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelRequest, ModelTurn,
};

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    #[allow(dead_code)]
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the conversation script,
/// which is how the model should respond to each request. Every request
/// consumes the next scripted turn; when the script runs out, an error
/// is returned.
///
/// The provider records every request it receives, so tests can assert
/// how the conversation history was threaded back to the model.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    script: Arc<Mutex<VecDeque<PresetTurn>>>,
    requests: Arc<Mutex<Vec<ModelRequest>>>,
}

impl TestModelProvider {
    /// Appends a turn to the conversation script.
    #[inline]
    pub fn add_turn(&mut self, turn: PresetTurn) {
        self.script.lock().unwrap().push_back(turn);
    }

    /// Returns all requests received so far, in arrival order.
    #[inline]
    pub fn recorded_requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ModelProvider for TestModelProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelTurn, Self::Error>> + Send + 'static
    {
        self.requests.lock().unwrap().push(req.clone());

        let result = match self.script.lock().unwrap().pop_front() {
            Some(PresetTurn::Failure(kind)) => Err(Error {
                message: "scripted failure",
                kind,
            }),
            Some(turn) => Ok(turn.into_model_turn()),
            None => Err(Error {
                message: "conversation script exhausted",
                kind: ErrorKind::Other,
            }),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use returns_agent_model::{ModelFinishReason, ModelMessage};
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_scripted_turns() {
        let mut provider = TestModelProvider::default();
        provider.add_turn(PresetTurn::answer("Hello, world!"));
        provider.add_turn(PresetTurn::tool_call(
            "tool:1",
            "lookup_order",
            json!({ "order_id": "ORD-001" }),
        ));

        let req = ModelRequest {
            messages: vec![ModelMessage::User("Hi".to_owned())],
            tools: vec![],
        };

        let turn = provider.send_request(&req).await.unwrap();
        assert_eq!(turn.text, "Hello, world!");
        assert_eq!(turn.finish_reason, ModelFinishReason::Stop);

        let turn = provider.send_request(&req).await.unwrap();
        assert_eq!(turn.tool_calls.len(), 1);
        assert_eq!(turn.tool_calls[0].name, "lookup_order");
        assert_eq!(turn.finish_reason, ModelFinishReason::ToolCalls);

        // The script is exhausted now.
        assert!(provider.send_request(&req).await.is_err());

        assert_eq!(provider.recorded_requests().len(), 3);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let mut provider = TestModelProvider::default();
        provider.add_turn(PresetTurn::Failure(ErrorKind::RateLimitExceeded));

        let req = ModelRequest {
            messages: vec![],
            tools: vec![],
        };
        let err = provider.send_request(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimitExceeded);
    }
}
