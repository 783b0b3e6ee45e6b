// file: src/output/prompt.rs
// description: query source selection, fixed string or interactive console prompt
// reference: console input handling

use crate::error::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Where the single query of a run comes from. Selected at the entry point:
/// `--query` gives a fixed question, its absence selects the interactive
/// prompt.
#[derive(Debug, Clone)]
pub enum QuerySource {
    Fixed(String),
    Interactive,
}

impl QuerySource {
    /// Resolve to the query string. The value passes through unvalidated; an
    /// empty line from the operator is a legal query.
    pub fn resolve(self) -> Result<String> {
        match self {
            QuerySource::Fixed(query) => Ok(query),
            QuerySource::Interactive => {
                print!("{} ", "Enter your query:".bold().cyan());
                io::stdout().flush()?;

                let mut line = String::new();
                io::stdin().lock().read_line(&mut line)?;

                Ok(strip_newline(line))
            }
        }
    }
}

fn strip_newline(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
