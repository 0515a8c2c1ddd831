//! Core types for prompt completion

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a completion call
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    /// The endpoint rejected the credential
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// The request never produced a usable HTTP response
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The endpoint responded, but with something unusable
    #[error("upstream error: {message}")]
    Upstream { message: String },
}

impl CompletionError {
    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create an upstream error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }
}

/// Trait for completion clients
///
/// Implementations send one prompt and return the completion text with
/// leading/trailing whitespace stripped. Every call is one-shot: no retry,
/// no backoff, no caching.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
