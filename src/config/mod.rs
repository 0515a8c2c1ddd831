//! Configuration types and loading for wikigen

mod loader;

#[allow(unused_imports)]
pub use loader::ConfigError;
pub use loader::{API_KEY_VAR, CompletionSettings, WikigenConfig, api_key};
