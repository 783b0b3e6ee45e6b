// file: src/parsing/elements.rs
// description: structural element extraction from parsed markdown
// reference: https://docs.rs/pulldown-cmark

use crate::error::Result;
use crate::llm::OpenAiClient;
use crate::models::Node;
use futures::stream::{self, StreamExt};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use tracing::{debug, info};

const SUMMARY_SYSTEM_PROMPT: &str = "You summarize tables extracted from documents. \
Describe in a few sentences what the table contains, naming its columns and any \
notable values, so the summary can stand in for the table during retrieval.";

/// A structural element lifted out of the markdown representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Heading-delimited prose section
    Text(String),
    /// Table reconstructed in pipe syntax
    Table(String),
}

/// Splits parsed markdown into prose sections and table elements, then turns
/// them into base text nodes and summarized object nodes.
pub struct ElementNodeParser {
    num_workers: usize,
}

#[derive(Default)]
struct TableBuilder {
    rows: Vec<Vec<String>>,
    current_row: Vec<String>,
    current_cell: String,
}

impl TableBuilder {
    fn end_cell(&mut self) {
        self.current_row.push(self.current_cell.trim().to_string());
        self.current_cell.clear();
    }

    fn end_row(&mut self) {
        if !self.current_row.is_empty() {
            self.rows.push(std::mem::take(&mut self.current_row));
        }
    }

    fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);

        for (idx, row) in self.rows.iter().enumerate() {
            lines.push(format!("| {} |", row.join(" | ")));

            if idx == 0 {
                let separator = row.iter().map(|_| "---").collect::<Vec<_>>().join(" | ");
                lines.push(format!("| {} |", separator));
            }
        }

        lines.join("\n")
    }
}

impl ElementNodeParser {
    pub fn new(num_workers: usize) -> Self {
        Self {
            num_workers: num_workers.max(1),
        }
    }

    /// Walk the markdown event stream and split it into heading-delimited
    /// text sections and tables. Empty sections are dropped.
    pub fn extract(&self, markdown: &str) -> Vec<Element> {
        let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES);

        let mut elements = Vec::new();
        let mut section = String::new();
        let mut table: Option<TableBuilder> = None;

        for event in parser {
            match event {
                Event::Start(Tag::Table(_)) => {
                    flush_section(&mut section, &mut elements);
                    table = Some(TableBuilder::default());
                }
                Event::End(TagEnd::Table) => {
                    if let Some(builder) = table.take() {
                        let rendered = builder.render();
                        if !rendered.is_empty() {
                            elements.push(Element::Table(rendered));
                        }
                    }
                }
                Event::End(TagEnd::TableHead) | Event::End(TagEnd::TableRow) => {
                    if let Some(ref mut builder) = table {
                        builder.end_row();
                    }
                }
                Event::End(TagEnd::TableCell) => {
                    if let Some(ref mut builder) = table {
                        builder.end_cell();
                    }
                }
                Event::Start(Tag::Heading { .. }) => {
                    flush_section(&mut section, &mut elements);
                }
                Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::Paragraph) => {
                    if table.is_none() {
                        section.push('\n');
                    }
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some(ref mut builder) = table {
                        builder.current_cell.push_str(&text);
                    } else {
                        section.push_str(&text);
                        section.push(' ');
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    if table.is_none() {
                        section.push('\n');
                    }
                }
                _ => {}
            }
        }

        flush_section(&mut section, &mut elements);

        debug!("Extracted {} elements from markdown", elements.len());
        elements
    }

    /// Produce base text nodes and object nodes from parsed markdown. Tables
    /// are summarized by the chat model with `num_workers` concurrent
    /// requests; the summary is what gets embedded later.
    pub async fn nodes_from_markdown(
        &self,
        markdown: &str,
        llm: &OpenAiClient,
    ) -> Result<(Vec<Node>, Vec<Node>)> {
        let elements = self.extract(markdown);

        let mut texts = Vec::new();
        let mut tables = Vec::new();
        for element in elements {
            match element {
                Element::Text(content) => texts.push(content),
                Element::Table(content) => tables.push(content),
            }
        }

        let base_nodes: Vec<Node> = texts.into_iter().map(Node::text).collect();

        info!(
            "Summarizing {} table(s) with {} workers",
            tables.len(),
            self.num_workers
        );

        let objects: Vec<Result<Node>> = stream::iter(tables.into_iter().map(|content| {
            async move {
                let summary = llm
                    .complete(
                        SUMMARY_SYSTEM_PROMPT,
                        &format!("Summarize this table:\n\n{}", content),
                    )
                    .await?;
                Ok(Node::object(content).with_summary(summary))
            }
        }))
        .buffer_unordered(self.num_workers)
        .collect()
        .await;

        let objects: Vec<Node> = objects.into_iter().collect::<Result<Vec<_>>>()?;

        info!(
            "Extracted {} text node(s) and {} object node(s)",
            base_nodes.len(),
            objects.len()
        );

        Ok((base_nodes, objects))
    }
}

fn flush_section(section: &mut String, elements: &mut Vec<Element>) {
    let trimmed = section.trim();
    if !trimmed.is_empty() {
        elements.push(Element::Text(trimmed.to_string()));
    }
    section.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    const SAMPLE: &str = "# Report\n\nIntro paragraph.\n\n\
| Quarter | Revenue |\n|---------|---------|\n| Q1 | 100 |\n| Q2 | 120 |\n\n\
## Notes\n\nClosing remarks.";

    #[test]
    fn test_extract_splits_text_and_tables() {
        let parser = ElementNodeParser::new(8);
        let elements = parser.extract(SAMPLE);

        let tables: Vec<_> = elements
            .iter()
            .filter(|e| matches!(e, Element::Table(_)))
            .collect();
        let texts: Vec<_> = elements
            .iter()
            .filter(|e| matches!(e, Element::Text(_)))
            .collect();

        assert_eq!(tables.len(), 1);
        assert!(texts.len() >= 2);
    }

    #[test]
    fn test_extracted_table_keeps_cells() {
        let parser = ElementNodeParser::new(8);
        let elements = parser.extract(SAMPLE);

        let table = elements
            .iter()
            .find_map(|e| match e {
                Element::Table(content) => Some(content),
                _ => None,
            })
            .unwrap();

        assert!(table.contains("| Quarter | Revenue |"));
        assert!(table.contains("| Q1 | 100 |"));
        assert!(table.lines().nth(1).unwrap().contains("---"));
    }

    #[test]
    fn test_extract_empty_markdown() {
        let parser = ElementNodeParser::new(8);
        assert!(parser.extract("").is_empty());
        assert!(parser.extract("\n\n   \n").is_empty());
    }

    #[test]
    fn test_zero_workers_clamped() {
        let parser = ElementNodeParser::new(0);
        assert_eq!(parser.num_workers, 1);
    }

    #[tokio::test]
    async fn test_no_tables_yields_no_objects() {
        // No tables means no summarization calls, so a dead client is fine.
        let config = Config::default_config();
        let llm = OpenAiClient::new("sk-test".to_string(), config.model);

        let parser = ElementNodeParser::new(2);
        let (base, objects) = parser
            .nodes_from_markdown("# Title\n\nJust prose.", &llm)
            .await
            .unwrap();

        assert_eq!(base.len(), 1);
        assert!(objects.is_empty());
    }
}
