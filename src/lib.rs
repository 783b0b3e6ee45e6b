// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod index;
pub mod llm;
pub mod models;
pub mod output;
pub mod parsing;
pub mod pipeline;
pub mod utils;

pub use config::{Config, Credentials, ModelConfig, ParsingConfig, QueryConfig};
pub use error::{PipelineError, Result};
pub use index::{QueryEngine, VectorIndex};
pub use llm::OpenAiClient;
pub use models::{Node, NodeKind, QueryResponse, SourceScore};
pub use output::{QuerySource, RenderMode};
pub use parsing::{Element, ElementNodeParser, LlamaParseClient};
pub use pipeline::PipelineOrchestrator;
pub use utils::Validator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _parser = ElementNodeParser::new(8);
    }
}
