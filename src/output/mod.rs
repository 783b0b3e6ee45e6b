// file: src/output/mod.rs
// description: console input and rendering module exports
// reference: internal module structure

pub mod prompt;
pub mod render;

pub use prompt::QuerySource;
pub use render::RenderMode;
