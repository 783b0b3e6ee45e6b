// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Secret API keys, loaded from the process environment only.
/// Never read from the toml config so they cannot end up checked in.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub llama_cloud_api_key: String,
    pub openai_api_key: String,
}

impl Credentials {
    /// Load both keys from the environment, after attempting to populate it
    /// from a local `.env` file. Fails naming the first missing key; a blank
    /// value counts as missing.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let llama_cloud_api_key = lookup("LLAMA_CLOUD_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(PipelineError::MissingCredential("llama cloud api key"))?;

        let openai_api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(PipelineError::MissingCredential("openai api key"))?;

        Ok(Self {
            llama_cloud_api_key,
            openai_api_key,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub parsing: ParsingConfig,
    pub model: ModelConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParsingConfig {
    pub base_url: String,
    pub result_type: String,
    pub num_workers: usize,
    pub poll_interval_secs: u64,
    pub max_poll_attempts: usize,
    pub preview_chars: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    pub base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub embed_batch_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    pub similarity_top_k: usize,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PDF_QUERY")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            parsing: ParsingConfig {
                base_url: "https://api.cloud.llamaindex.ai".to_string(),
                result_type: "markdown".to_string(),
                num_workers: 8,
                poll_interval_secs: 2,
                max_poll_attempts: 150,
                preview_chars: 1000,
            },
            model: ModelConfig {
                base_url: "https://api.openai.com/v1".to_string(),
                chat_model: "gpt-4o".to_string(),
                embedding_model: "text-embedding-3-small".to_string(),
                embed_batch_size: 64,
            },
            query: QueryConfig {
                similarity_top_k: 25,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.parsing.num_workers == 0 {
            return Err(PipelineError::Config(
                "num_workers must be greater than 0".to_string(),
            ));
        }

        if self.parsing.poll_interval_secs == 0 {
            return Err(PipelineError::Config(
                "poll_interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.model.embed_batch_size == 0 {
            return Err(PipelineError::Config(
                "embed_batch_size must be greater than 0".to_string(),
            ));
        }

        if self.query.similarity_top_k == 0 {
            return Err(PipelineError::Config(
                "similarity_top_k must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.query.similarity_top_k, 25);
        assert_eq!(config.parsing.num_workers, 8);
        assert_eq!(config.model.chat_model, "gpt-4o");
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let mut config = Config::default_config();
        config.query.similarity_top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = Config::default_config();
        config.parsing.num_workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_missing_llama_key() {
        let err = Credentials::from_lookup(|_| None).unwrap_err();
        assert!(err.to_string().contains("llama cloud api key"));
    }

    #[test]
    fn test_credentials_missing_openai_key() {
        let err = Credentials::from_lookup(|name| {
            (name == "LLAMA_CLOUD_API_KEY").then(|| "llx-test".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("openai api key"));
    }

    #[test]
    fn test_credentials_blank_counts_as_missing() {
        let err = Credentials::from_lookup(|name| match name {
            "LLAMA_CLOUD_API_KEY" => Some("   ".to_string()),
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(err.to_string().contains("llama cloud api key"));
    }

    #[test]
    fn test_credentials_returned_unchanged() {
        let creds = Credentials::from_lookup(|name| match name {
            "LLAMA_CLOUD_API_KEY" => Some("llx-not-a-real-key".to_string()),
            "OPENAI_API_KEY" => Some("sk-not-a-real-key".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(creds.llama_cloud_api_key, "llx-not-a-real-key");
        assert_eq!(creds.openai_api_key, "sk-not-a-real-key");
    }
}
