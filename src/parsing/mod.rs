// file: src/parsing/mod.rs
// description: document parsing module exports
// reference: internal module structure

pub mod client;
pub mod elements;

pub use client::LlamaParseClient;
pub use elements::{Element, ElementNodeParser};
