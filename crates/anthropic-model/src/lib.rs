//! A model provider for the Anthropic Messages API.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use returns_agent_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelRequest, ModelTurn,
};
use reqwest::{Client, StatusCode, header};

pub use config::{AnthropicConfig, AnthropicConfigBuilder};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Error type for [`AnthropicProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Anthropic Messages API model provider.
#[derive(Clone, Debug)]
pub struct AnthropicProvider {
    client: Client,
    config: Arc<AnthropicConfig>,
}

impl AnthropicProvider {
    /// Creates a new `AnthropicProvider` with the given configuration.
    #[inline]
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl ModelProvider for AnthropicProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelTurn, Self::Error>> + Send + 'static
    {
        let anthropic_req = proto::create_request(req, &self.config);
        let resp_fut = self
            .client
            .post(format!("{}{}", self.config.base_url, "/v1/messages"))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&anthropic_req)
            .send();

        async move {
            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => {
                    return Err(Error::new(format!("{err}"), ErrorKind::Other));
                }
            };

            let status = resp.status();
            if !status.is_success() {
                let kind = match status {
                    StatusCode::TOO_MANY_REQUESTS => {
                        ErrorKind::RateLimitExceeded
                    }
                    StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST => {
                        ErrorKind::InvalidRequest
                    }
                    _ => ErrorKind::Other,
                };
                let body = resp.text().await.unwrap_or_default();
                return Err(Error::new(
                    format!("request failed with {status}: {body}"),
                    kind,
                ));
            }

            let messages_resp: proto::MessagesResponse =
                match resp.json().await {
                    Ok(parsed) => parsed,
                    Err(err) => {
                        return Err(Error::new(
                            format!("malformed response body: {err}"),
                            ErrorKind::Other,
                        ));
                    }
                };
            trace!("got a response: {messages_resp:?}");

            Ok(proto::into_model_turn(messages_resp))
        }
    }
}
