//! OpenAI-compatible content generation.
//!
//! Works with any endpoint that follows the OpenAI chat completions format
//! and honors `response_format: {"type": "json_object"}`.

mod client;
mod dto;
pub mod prompt;

pub use client::OpenAICompatibleGenerator;
pub use dto::{ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatUsage, ResponseFormat};
