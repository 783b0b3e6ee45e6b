// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{0} not found in environment variables")]
    MissingCredential(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parsing service error: {0}")]
    Parsing(String),

    #[error("Model service error: {0}")]
    Model(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message_names_key() {
        let err = PipelineError::MissingCredential("llama cloud api key");
        assert_eq!(
            err.to_string(),
            "llama cloud api key not found in environment variables"
        );

        let err = PipelineError::MissingCredential("openai api key");
        assert!(err.to_string().contains("openai api key"));
    }
}
