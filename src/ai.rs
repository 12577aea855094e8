//! Model access: configuration, the shortcode catalog, prompt building and
//! the Messages API client.

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod prompts;

pub use client::{AnthropicClient, ImageSource};
pub use config::AiConfig;
pub use error::CompletionError;
