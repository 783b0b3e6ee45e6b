// file: src/models/answer.rs
// description: synthesized answer with retrieved source scores
// reference: used for query results and console rendering

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceScore {
    /// Node ID (content hash)
    pub node_id: String,

    /// Similarity score (higher is more similar, typically 0.0-1.0)
    pub score: f32,

    /// Short preview of the node content
    pub preview: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The question as issued, unmodified
    pub query: String,

    /// Model-synthesized answer text
    pub answer: String,

    /// Retrieved nodes that backed the answer, ordered by similarity
    pub sources: Vec<SourceScore>,
}

impl QueryResponse {
    pub fn new(query: String, answer: String, sources: Vec<SourceScore>) -> Self {
        Self {
            query,
            answer,
            sources,
        }
    }

    /// Format the retrieved sources as a summary block for verbose output.
    pub fn format_sources(&self) -> String {
        self.sources
            .iter()
            .enumerate()
            .map(|(idx, s)| format!("{}. [{:.4}] {}", idx + 1, s.score, s.preview))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sources() {
        let response = QueryResponse::new(
            "what is in the table?".to_string(),
            "The table lists quarterly revenue.".to_string(),
            vec![
                SourceScore {
                    node_id: "abc".to_string(),
                    score: 0.91,
                    preview: "Revenue table".to_string(),
                },
                SourceScore {
                    node_id: "def".to_string(),
                    score: 0.52,
                    preview: "Intro section".to_string(),
                },
            ],
        );

        let formatted = response.format_sources();
        assert!(formatted.contains("1. [0.9100] Revenue table"));
        assert!(formatted.contains("2. [0.5200] Intro section"));
    }
}
