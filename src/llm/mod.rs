// file: src/llm/mod.rs
// description: language model client module exports
// reference: internal module structure

pub mod openai;

pub use openai::OpenAiClient;
