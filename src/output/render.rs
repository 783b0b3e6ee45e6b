// file: src/output/render.rs
// description: answer rendering, plain text or side-by-side panel layout
// reference: console layout with box drawing characters

use crate::models::QueryResponse;
use colored::Colorize;

/// Inner text width of each panel.
const PANEL_WIDTH: usize = 46;

/// Panels are padded to at least this many content rows.
const MIN_HEIGHT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Print the answer text only.
    Plain,
    /// Two-panel layout echoing the query next to the answer.
    Panel,
}

pub fn render(mode: RenderMode, response: &QueryResponse) {
    match mode {
        RenderMode::Plain => println!("{}", response.answer),
        RenderMode::Panel => render_panels(response),
    }
}

fn render_panels(response: &QueryResponse) {
    let query_text = format!("User query: {}", response.query);
    let query_lines = wrap_text(&query_text, PANEL_WIDTH);
    let answer_lines = wrap_text(&response.answer, PANEL_WIDTH);

    let height = query_lines.len().max(answer_lines.len()).max(MIN_HEIGHT);

    let query_panel = build_panel(None, &query_lines, PANEL_WIDTH, height);
    let answer_panel = build_panel(Some("Query Response"), &answer_lines, PANEL_WIDTH, height);

    for (left, right) in query_panel.iter().zip(answer_panel.iter()) {
        println!("{} {}", left.bold().cyan(), right.bold().green());
    }
}

/// Render a bordered panel as uncolored lines of uniform width.
fn build_panel(
    title: Option<&str>,
    lines: &[String],
    width: usize,
    height: usize,
) -> Vec<String> {
    let mut rows = Vec::with_capacity(height + 2);

    let top = match title {
        Some(title) if title.len() + 4 <= width => {
            format!("┌─ {} {}┐", title, "─".repeat(width - title.len() - 1))
        }
        _ => format!("┌{}┐", "─".repeat(width + 2)),
    };
    rows.push(top);

    for i in 0..height {
        let content = lines.get(i).map(String::as_str).unwrap_or("");
        rows.push(format!("│ {:<width$} │", content, width = width));
    }

    rows.push(format!("└{}┘", "─".repeat(width + 2)));
    rows
}

/// Word-wrap to `width` characters, preserving explicit line breaks and
/// hard-splitting words longer than a full line.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        // whitespace-only lines survive as blank rows, same as empty ones
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let word_len = word.chars().count();

            if word_len > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(width) {
                    lines.push(chunk.iter().collect());
                }
                continue;
            }

            let current_len = current.chars().count();
            if current.is_empty() {
                current.push_str(word);
            } else if current_len + 1 + word_len <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_text_respects_width() {
        let lines = wrap_text("one two three four five six seven eight", 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines[0], "one two");
    }

    #[test]
    fn test_wrap_text_preserves_line_breaks() {
        let lines = wrap_text("first\n\nsecond", 20);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn test_wrap_text_keeps_whitespace_only_lines() {
        let lines = wrap_text("first\n   \nsecond", 20);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn test_wrap_text_splits_long_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_build_panel_dimensions() {
        let lines = vec!["hello".to_string()];
        let panel = build_panel(Some("Title"), &lines, 20, 10);

        // border rows plus padded content rows
        assert_eq!(panel.len(), 12);
        assert!(panel[0].contains("Title"));
        assert!(panel[1].contains("hello"));

        // every row, borders included, renders at the same width
        let content_width = panel[1].chars().count();
        assert!(panel
            .iter()
            .all(|row| row.chars().count() == content_width));
    }

    #[test]
    fn test_build_panel_without_title() {
        let panel = build_panel(None, &[], 10, 2);
        assert_eq!(panel.len(), 4);
        assert!(!panel[0].contains(' '));
    }

    #[test]
    fn test_panel_height_padding() {
        let lines = wrap_text("short", PANEL_WIDTH);
        let panel = build_panel(None, &lines, PANEL_WIDTH, MIN_HEIGHT);
        assert_eq!(panel.len(), MIN_HEIGHT + 2);
    }
}
