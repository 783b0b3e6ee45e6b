// file: src/index/mod.rs
// description: in-memory vector index module exports
// reference: internal module structure

pub mod query;
pub mod vector;

pub use query::QueryEngine;
pub use vector::VectorIndex;
