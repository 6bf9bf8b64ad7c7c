// LLM module: text-generation client and response parsing helpers.

pub mod client;
pub mod json;

pub use client::{AnthropicClient, GenerationError, GenerationRequest, TextGenerator};
