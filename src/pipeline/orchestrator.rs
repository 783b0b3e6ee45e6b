// file: src/pipeline/orchestrator.rs
// description: coordinates parsing, node extraction, indexing, and querying
// reference: single linear pass, no retries, no persistence

use crate::config::{Config, Credentials};
use crate::error::Result;
use crate::index::{QueryEngine, VectorIndex};
use crate::llm::OpenAiClient;
use crate::models::QueryResponse;
use crate::output::QuerySource;
use crate::parsing::{ElementNodeParser, LlamaParseClient};
use crate::utils::Validator;
use std::path::Path;
use tracing::info;

/// Runs the four pipeline steps strictly in order: credentials were resolved
/// before this exists, nodes exist before the index is built, the index
/// exists before the query is issued. Both client handles are owned here and
/// passed explicitly to collaborators.
pub struct PipelineOrchestrator {
    config: Config,
    parse_client: LlamaParseClient,
    llm: OpenAiClient,
}

impl PipelineOrchestrator {
    pub fn new(config: Config, credentials: Credentials) -> Self {
        let parse_client =
            LlamaParseClient::new(credentials.llama_cloud_api_key, config.parsing.clone());
        let llm = OpenAiClient::new(credentials.openai_api_key, config.model.clone());

        Self {
            config,
            parse_client,
            llm,
        }
    }

    /// Full pipeline: parse, extract nodes, index, answer one query. The
    /// interactive query source is resolved only after the index is ready,
    /// so the operator is prompted against a queryable document.
    pub async fn run(&self, file: &Path, source: QuerySource) -> Result<QueryResponse> {
        Validator::validate_file_path(file)?;
        Validator::validate_pdf_extension(file)?;

        let markdown = self.parse_client.parse_file(file).await?;
        Validator::validate_content_not_empty(&markdown)?;
        self.log_preview(&markdown);

        let parser = ElementNodeParser::new(self.config.parsing.num_workers);
        let (base_nodes, objects) = parser.nodes_from_markdown(&markdown, &self.llm).await?;

        let mut nodes = base_nodes;
        nodes.extend(objects);

        let index = VectorIndex::build(nodes, &self.llm).await?;

        let engine = QueryEngine::new(
            index,
            self.llm.clone(),
            self.config.query.similarity_top_k,
        );

        let question = source.resolve()?;
        engine.query(&question).await
    }

    /// Parse only, returning the markdown representation. Backs the `parse`
    /// subcommand used for manual inspection of the parsing output.
    pub async fn parse_only(&self, file: &Path) -> Result<String> {
        Validator::validate_file_path(file)?;
        Validator::validate_pdf_extension(file)?;
        self.parse_client.parse_file(file).await
    }

    fn log_preview(&self, markdown: &str) {
        let preview = Validator::truncate_chars(markdown, self.config.parsing.preview_chars);
        info!("Parsed markdown preview:\n{}", preview);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> Credentials {
        Credentials {
            llama_cloud_api_key: "llx-test".to_string(),
            openai_api_key: "sk-test".to_string(),
        }
    }

    #[test]
    fn test_orchestrator_creation() {
        let config = Config::default_config();
        let orchestrator = PipelineOrchestrator::new(config, test_credentials());
        assert_eq!(orchestrator.config.query.similarity_top_k, 25);
    }

    #[tokio::test]
    async fn test_run_rejects_missing_file() {
        // Path validation fails before any service call is attempted.
        let config = Config::default_config();
        let orchestrator = PipelineOrchestrator::new(config, test_credentials());

        let result = orchestrator
            .run(
                Path::new("/nonexistent/document.pdf"),
                QuerySource::Fixed("anything".to_string()),
            )
            .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_run_rejects_non_pdf_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let file_path = temp.path().join("notes.txt");
        std::fs::write(&file_path, "plain text").unwrap();

        let config = Config::default_config();
        let orchestrator = PipelineOrchestrator::new(config, test_credentials());

        let result = orchestrator
            .run(&file_path, QuerySource::Fixed("anything".to_string()))
            .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("not a PDF"));
    }

    #[tokio::test]
    async fn test_parse_only_rejects_non_pdf_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let file_path = temp.path().join("notes.md");
        std::fs::write(&file_path, "# heading").unwrap();

        let config = Config::default_config();
        let orchestrator = PipelineOrchestrator::new(config, test_credentials());

        let err = orchestrator.parse_only(&file_path).await.unwrap_err();
        assert!(err.to_string().contains("not a PDF"));
    }
}
