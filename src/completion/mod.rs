//! Prompt completion client
//!
//! One-shot "prompt in, trimmed text out" exchange with a chat-completion
//! endpoint. The runner depends on the [`Completion`] trait so tests can
//! inject a scripted client; [`HttpCompletionClient`] is the real thing.

mod http;
mod types;

pub use http::HttpCompletionClient;
pub use types::{Completion, CompletionError};
