//! Line-by-line buffering for the interactive shell.
//!
//! Unlike [`super::segmenter::Segmenter`], completion is decided by quote
//! parity over the whole buffer: a statement is complete once both quote
//! kinds occur an even number of times and the buffer ends with `;`.

use super::segmenter::TERMINATOR;
use super::statement::Statement;

pub const PRIMARY_PROMPT: &str = "SQL> ";
pub const CONTINUATION_PROMPT: &str = " ... ";

#[derive(Debug, Default)]
pub struct Accumulator {
    lines: Vec<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn prompt(&self) -> &'static str {
        if self.is_empty() {
            PRIMARY_PROMPT
        } else {
            CONTINUATION_PROMPT
        }
    }

    #[must_use]
    pub fn buffered(&self) -> String {
        self.lines.join("\n")
    }

    /// Appends a line and returns the statement it completes, if any.
    /// The buffer is empty again whenever a statement is returned.
    pub fn push_line(&mut self, line: &str) -> Option<Statement> {
        if self.lines.is_empty() && line.trim().is_empty() {
            return None;
        }
        self.lines.push(line.to_string());

        let joined = self.buffered();
        if !has_even_quotes(&joined) {
            return None;
        }
        let body = joined.trim_end().strip_suffix(TERMINATOR)?;
        let statement = Statement::new(body);
        self.lines.clear();
        Some(statement)
    }

    /// Drops any partial statement.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

fn has_even_quotes(text: &str) -> bool {
    let singles = text.chars().filter(|&c| c == '\'').count();
    let doubles = text.chars().filter(|&c| c == '"').count();
    singles % 2 == 0 && doubles % 2 == 0
}
