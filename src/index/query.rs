// file: src/index/query.rs
// description: retrieval and answer synthesis over the vector index
// reference: retrieve top-k nodes, synthesize with the chat model

use crate::error::Result;
use crate::index::VectorIndex;
use crate::llm::OpenAiClient;
use crate::models::{Node, QueryResponse, SourceScore};
use tracing::{debug, info};

const ANSWER_SYSTEM_PROMPT: &str = "You answer questions about a document using \
only the provided context passages. If the context does not contain the answer, \
say so. Be concise.";

const PREVIEW_CHARS: usize = 120;

pub struct QueryEngine {
    index: VectorIndex,
    llm: OpenAiClient,
    similarity_top_k: usize,
}

impl QueryEngine {
    pub fn new(index: VectorIndex, llm: OpenAiClient, similarity_top_k: usize) -> Self {
        Self {
            index,
            llm,
            similarity_top_k,
        }
    }

    /// Answer a single question against the index. The question is passed
    /// through as given; empty input is legal and goes to the model as-is.
    pub async fn query(&self, question: &str) -> Result<QueryResponse> {
        info!("Querying index ({} entries)", self.index.len());

        let query_embedding = self.llm.embed(question).await?;
        let hits = self.index.search(&query_embedding, self.similarity_top_k);

        debug!("Retrieved {} nodes for synthesis", hits.len());

        let context = build_context(&hits);
        let user_prompt = format!("Context:\n{}\n\nQuestion: {}", context, question);

        let answer = self.llm.complete(ANSWER_SYSTEM_PROMPT, &user_prompt).await?;

        let sources = hits
            .iter()
            .map(|(node, score)| SourceScore {
                node_id: node.id.clone(),
                score: *score,
                preview: crate::utils::Validator::truncate_chars(&node.content, PREVIEW_CHARS),
            })
            .collect();

        Ok(QueryResponse::new(question.to_string(), answer, sources))
    }
}

fn build_context(hits: &[(&Node, f32)]) -> String {
    hits.iter()
        .enumerate()
        .map(|(idx, (node, _))| format!("[{}]\n{}", idx + 1, node.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}
