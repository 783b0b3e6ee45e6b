// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod answer;
pub mod node;

pub use answer::{QueryResponse, SourceScore};
pub use node::{Node, NodeKind};
