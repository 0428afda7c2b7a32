//! Core logic including the agent loop, conversation state, and tool
//! execution.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod agent;
pub mod conversation;
mod model_client;
pub mod tool;

pub use agent::{
    Agent, AgentBuilder, AgentError, AgentEvent, RunOutcome,
    DEFAULT_MAX_ITERATIONS,
};
