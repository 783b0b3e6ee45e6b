// file: src/utils/validation.rs
// description: input validation utilities and helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(PipelineError::Validation(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(PipelineError::Validation(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_pdf_extension(path: &Path) -> Result<()> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => Ok(()),
            _ => Err(PipelineError::Validation(format!(
                "File is not a PDF: {}",
                path.display()
            ))),
        }
    }

    pub fn validate_content_not_empty(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(PipelineError::Validation("Content is empty".to_string()));
        }
        Ok(())
    }

    /// Truncate on a character boundary, appending an ellipsis when cut.
    pub fn truncate_chars(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let truncated: String = text.chars().take(max_chars).collect();
            format!("{}...", truncated)
        }
    }
}
