// file: src/models/node.rs
// description: retrievable content unit produced by element extraction
// reference: internal data structures

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Plain prose section of the parsed document.
    Text,
    /// Structured element lifted out of the document, currently tables.
    Object,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub content: String,
    pub kind: NodeKind,
    /// Model-generated summary for object nodes. When present it stands in
    /// for the raw content at embedding time.
    pub summary: Option<String>,
}

impl Node {
    pub fn text(content: String) -> Self {
        let id = Self::compute_id(&content);
        Self {
            id,
            content,
            kind: NodeKind::Text,
            summary: None,
        }
    }

    pub fn object(content: String) -> Self {
        let id = Self::compute_id(&content);
        Self {
            id,
            content,
            kind: NodeKind::Object,
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: String) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Text handed to the embedding model for this node.
    pub fn embedding_text(&self) -> &str {
        self.summary.as_deref().unwrap_or(&self.content)
    }

    fn compute_id(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_node_creation() {
        let node = Node::text("Some section content".to_string());
        assert_eq!(node.kind, NodeKind::Text);
        assert!(!node.id.is_empty());
        assert!(node.summary.is_none());
    }

    #[test]
    fn test_id_is_deterministic() {
        let a = Node::text("same content".to_string());
        let b = Node::text("same content".to_string());
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_embedding_text_prefers_summary() {
        let node = Node::object("| a | b |\n|---|---|\n| 1 | 2 |".to_string())
            .with_summary("A two column table of numbers".to_string());
        assert_eq!(node.embedding_text(), "A two column table of numbers");

        let plain = Node::text("prose".to_string());
        assert_eq!(plain.embedding_text(), "prose");
    }
}
