// file: src/index/vector.rs
// description: in-memory vector index with cosine similarity search
// reference: built once per run, discarded on exit

use crate::error::{PipelineError, Result};
use crate::llm::OpenAiClient;
use crate::models::Node;
use tracing::{debug, info};

struct IndexEntry {
    node: Node,
    embedding: Vec<f32>,
}

/// Maps nodes to normalized embedding vectors. Lives only for the duration of
/// the process; there is no persistence.
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Embed the given nodes in batches and build the index. Object nodes are
    /// embedded through their summary when one exists.
    pub async fn build(nodes: Vec<Node>, llm: &OpenAiClient) -> Result<Self> {
        if nodes.is_empty() {
            return Err(PipelineError::Index(
                "Cannot build an index over zero nodes".to_string(),
            ));
        }

        info!("Building vector index over {} nodes", nodes.len());

        let batch_size = llm.embed_batch_size();
        let mut entries = Vec::with_capacity(nodes.len());

        for batch in nodes.chunks(batch_size) {
            let texts: Vec<String> = batch
                .iter()
                .map(|node| node.embedding_text().to_string())
                .collect();

            let vectors = llm.embed_batch(&texts).await?;
            debug!("Embedded batch of {}", vectors.len());

            for (node, mut embedding) in batch.iter().cloned().zip(vectors) {
                normalize_vector(&mut embedding);
                entries.push(IndexEntry { node, embedding });
            }
        }

        info!("Vector index ready ({} entries)", entries.len());
        Ok(Self { entries })
    }

    /// Return the `top_k` most similar nodes for a query embedding, ordered
    /// by descending similarity.
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Vec<(&Node, f32)> {
        let mut query = query_embedding.to_vec();
        normalize_vector(&mut query);

        let mut hits: Vec<(&Node, f32)> = self
            .entries
            .iter()
            .map(|entry| (&entry.node, cosine_similarity(&query, &entry.embedding)))
            .collect();

        hits.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(top_k);
        hits
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    fn from_raw(pairs: Vec<(Node, Vec<f32>)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(node, mut embedding)| {
                normalize_vector(&mut embedding);
                IndexEntry { node, embedding }
            })
            .collect();
        Self { entries }
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let len = a.len().min(b.len());
    a.iter().zip(b.iter()).take(len).map(|(x, y)| x * y).sum()
}

fn normalize_vector(vec: &mut [f32]) {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vec.iter_mut() {
            *v /= norm;
        }
    }
}
