//! An out-of-the-box customer support agent for product returns.
//!
//! The crate includes a CLI tool for using in the terminal. And you can
//! also use it as a library to bring the return-support agent into your
//! own host apps.

#![deny(missing_docs)]

mod session;
pub mod store;
pub mod tools;

pub use session::{Session, SessionBuilder};

/// Re-exports of [`returns_agent_core`] crate.
pub mod core {
    pub use returns_agent_core::*;
}
