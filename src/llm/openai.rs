// file: src/llm/openai.rs
// description: OpenAI API integration for chat completions and text embeddings
// reference: https://platform.openai.com/docs/api-reference

use crate::config::ModelConfig;
use crate::error::{PipelineError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    input: Vec<String>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

/// Client handle for the hosted generation and embedding models. Cheap to
/// clone; passed explicitly to every collaborator that needs it rather than
/// installed as process-wide default.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    config: ModelConfig,
}

impl OpenAiClient {
    pub fn new(api_key: String, config: ModelConfig) -> Self {
        Self {
            client: Client::new(),
            api_key,
            config,
        }
    }

    pub fn embed_batch_size(&self) -> usize {
        self.config.embed_batch_size
    }

    /// Single chat completion round against the configured chat model.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let request = ChatRequest {
            model: self.config.chat_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user.to_string(),
                },
            ],
        };

        debug!(
            "Requesting chat completion from {} ({} user chars)",
            self.config.chat_model,
            user.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Model(format!("Failed to send chat request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::Model(format!(
                "Chat request failed with status {}: {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Model(format!("Failed to parse chat response: {}", e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| PipelineError::Model("No choices returned from chat API".to_string()))
    }

    /// Embed a batch of texts, preserving input order.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}/embeddings", self.config.base_url);

        let request = EmbeddingRequest {
            input: texts.to_vec(),
            model: self.config.embedding_model.clone(),
        };

        debug!(
            "Requesting embeddings from {} for {} texts",
            self.config.embedding_model,
            texts.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                PipelineError::Model(format!("Failed to send embedding request: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::Model(format!(
                "Embedding request failed with status {}: {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse = response.json().await.map_err(|e| {
            PipelineError::Model(format!("Failed to parse embedding response: {}", e))
        })?;

        if embedding_response.data.len() != texts.len() {
            return Err(PipelineError::Model(format!(
                "Embedding API returned {} vectors for {} inputs",
                embedding_response.data.len(),
                texts.len()
            )));
        }

        // The API documents index-ordered data, but sort anyway.
        let mut data = embedding_response.data;
        data.sort_by_key(|d| d.index);

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }

    /// Embed a single text.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| PipelineError::Model("No embedding data returned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_client_construction() {
        let config = Config::default_config();
        let client = OpenAiClient::new("sk-test".to_string(), config.model);
        assert_eq!(client.embed_batch_size(), 64);
    }

    #[test]
    fn test_embedding_request_serialization() {
        let request = EmbeddingRequest {
            input: vec!["hello".to_string()],
            model: "text-embedding-3-small".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "text-embedding-3-small");
        assert_eq!(json["input"][0], "hello");
    }

    #[test]
    fn test_chat_response_deserialization() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"42"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "42");
    }
}
