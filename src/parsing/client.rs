// file: src/parsing/client.rs
// description: LlamaParse cloud API client for PDF to markdown conversion
// reference: https://docs.cloud.llamaindex.ai/llamaparse/getting_started

use crate::config::ParsingConfig;
use crate::error::{PipelineError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct JobStatus {
    status: String,
}

#[derive(Debug, Deserialize)]
struct MarkdownResult {
    markdown: String,
}

pub struct LlamaParseClient {
    client: Client,
    api_key: String,
    config: ParsingConfig,
}

impl LlamaParseClient {
    pub fn new(api_key: String, config: ParsingConfig) -> Self {
        Self {
            client: Client::new(),
            api_key,
            config,
        }
    }

    /// Upload a document, wait for the parsing job to finish, and return the
    /// markdown result. Document-format support is enforced by the service;
    /// service-side failures surface here unmodified.
    pub async fn parse_file(&self, path: &Path) -> Result<String> {
        let job_id = self.upload(path).await?;
        info!("Parsing job submitted: {}", job_id);

        self.wait_for_job(&job_id).await?;

        let markdown = self.fetch_markdown(&job_id).await?;
        info!("Parsed markdown: {} chars", markdown.len());

        Ok(markdown)
    }

    async fn upload(&self, path: &Path) -> Result<String> {
        let url = format!("{}/api/parsing/upload", self.config.base_url);

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document.pdf")
            .to_string();

        debug!("Uploading {} ({} bytes)", file_name, bytes.len());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")
            .map_err(|e| PipelineError::Parsing(format!("Invalid mime type: {}", e)))?;

        let form = Form::new()
            .part("file", part)
            .text("result_type", self.config.result_type.clone());

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| PipelineError::Parsing(format!("Failed to upload document: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::Parsing(format!(
                "Upload failed with status {}: {}",
                status, error_text
            )));
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Parsing(format!("Failed to parse upload response: {}", e)))?;

        Ok(upload.id)
    }

    async fn wait_for_job(&self, job_id: &str) -> Result<()> {
        let url = format!("{}/api/parsing/job/{}", self.config.base_url, job_id);

        let spinner = create_spinner("Waiting for parsing job");

        for attempt in 0..self.config.max_poll_attempts {
            let response = self
                .client
                .get(&url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .send()
                .await
                .map_err(|e| PipelineError::Parsing(format!("Failed to poll job: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                spinner.finish_and_clear();
                return Err(PipelineError::Parsing(format!(
                    "Job status request failed with status {}: {}",
                    status, error_text
                )));
            }

            let job: JobStatus = response.json().await.map_err(|e| {
                PipelineError::Parsing(format!("Failed to parse job status: {}", e))
            })?;

            debug!("Job {} attempt {}: {}", job_id, attempt + 1, job.status);
            spinner.set_message(format!("Parsing job status: {}", job.status));

            match job.status.as_str() {
                "SUCCESS" => {
                    spinner.finish_with_message("Parsing complete");
                    return Ok(());
                }
                "ERROR" | "CANCELED" => {
                    spinner.finish_and_clear();
                    return Err(PipelineError::Parsing(format!(
                        "Parsing job {} ended with status {}",
                        job_id, job.status
                    )));
                }
                _ => {
                    tokio::time::sleep(Duration::from_secs(self.config.poll_interval_secs)).await;
                }
            }
        }

        spinner.finish_and_clear();
        Err(PipelineError::Parsing(format!(
            "Parsing job {} did not finish within {} attempts",
            job_id, self.config.max_poll_attempts
        )))
    }

    async fn fetch_markdown(&self, job_id: &str) -> Result<String> {
        let url = format!(
            "{}/api/parsing/job/{}/result/markdown",
            self.config.base_url, job_id
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| PipelineError::Parsing(format!("Failed to fetch result: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::Parsing(format!(
                "Result request failed with status {}: {}",
                status, error_text
            )));
        }

        let result: MarkdownResult = response
            .json()
            .await
            .map_err(|e| PipelineError::Parsing(format!("Failed to parse result body: {}", e)))?;

        Ok(result.markdown)
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .expect("Failed to create spinner template"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_client_construction() {
        let config = Config::default_config();
        let client = LlamaParseClient::new("llx-test".to_string(), config.parsing);
        assert_eq!(client.config.result_type, "markdown");
    }

    #[test]
    fn test_upload_response_deserialization() {
        let raw = r#"{"id":"job-123","status":"PENDING"}"#;
        let parsed: UploadResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.id, "job-123");
    }

    #[test]
    fn test_markdown_result_deserialization() {
        let raw = r##"{"markdown":"# Title\n\nBody","job_metadata":{}}"##;
        let parsed: MarkdownResult = serde_json::from_str(raw).unwrap();
        assert!(parsed.markdown.starts_with("# Title"));
    }
}
