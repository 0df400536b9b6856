//! Quote-aware statement splitting.
//!
//! The scanner only tracks whether it is inside a single- or double-quoted
//! region. A terminator outside both ends the current statement. Doubled
//! quotes (`'it''s'`) are two toggles, not an escape: the region closes and
//! immediately reopens, which leaves the boundaries unchanged.

use super::statement::Statement;
use std::str::Chars;

/// Ends a statement when it appears outside quotes.
pub const TERMINATOR: char = ';';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteState {
    pub in_single: bool,
    pub in_double: bool,
}

impl QuoteState {
    /// A quote toggles its own flag only while the other kind is closed.
    pub fn observe(&mut self, ch: char) {
        match ch {
            '\'' if !self.in_double => self.in_single = !self.in_single,
            '"' if !self.in_single => self.in_double = !self.in_double,
            _ => {}
        }
    }

    #[must_use]
    pub const fn is_quoted(self) -> bool {
        self.in_single || self.in_double
    }
}

/// Scan state carried across calls to [`Segmenter::segment`].
#[derive(Debug, Default)]
pub struct Segmenter {
    state: QuoteState,
    buffer: String,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lazily yields every statement completed by `input`.
    ///
    /// Empty statements (e.g. from `;;`) are yielded too; callers that
    /// execute statements filter them out.
    pub fn segment<'s, 'a>(&'s mut self, input: &'a str) -> Segments<'s, 'a> {
        Segments {
            segmenter: self,
            chars: input.chars(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> QuoteState {
        self.state
    }

    /// Text seen since the last boundary.
    #[must_use]
    pub fn residual(&self) -> &str {
        &self.buffer
    }

    /// Permissive end of input: a non-blank residual becomes a final statement.
    #[must_use]
    pub fn finish(self) -> Option<Statement> {
        let tail = Statement::new(&self.buffer);
        (!tail.is_empty()).then_some(tail)
    }
}

pub struct Segments<'s, 'a> {
    segmenter: &'s mut Segmenter,
    chars: Chars<'a>,
}

impl Iterator for Segments<'_, '_> {
    type Item = Statement;

    fn next(&mut self) -> Option<Statement> {
        for ch in self.chars.by_ref() {
            self.segmenter.state.observe(ch);
            if ch == TERMINATOR && !self.segmenter.state.is_quoted() {
                let text = std::mem::take(&mut self.segmenter.buffer);
                return Some(Statement::new(&text));
            }
            self.segmenter.buffer.push(ch);
        }
        None
    }
}

/// Splits a whole script into statements, in order, dropping blank ones.
/// A trailing statement without a terminator is kept.
pub fn split_batch(text: &str) -> Vec<Statement> {
    let mut segmenter = Segmenter::new();
    let mut statements: Vec<Statement> = segmenter.segment(text).collect();
    statements.extend(segmenter.finish());
    statements.retain(|s| !s.is_empty());
    statements
}
