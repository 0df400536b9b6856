//! Fixed-width text tables.
//!
//! ```text
//! ID | NAME
//! ---+------
//! 1  | Ada
//! 2  | Linus
//! ```
//!
//! Column widths come from the header and every row, including rows cut by
//! the limit, so the layout does not depend on how much is shown. Cells are
//! left-justified; nulls render as empty cells.

use crate::core::{RenderLimit, ResultSet};
use std::fmt::Write;

const COLUMN_SEPARATOR: &str = " | ";
const RULE_SEPARATOR: &str = "-+-";

pub struct TableFormatter<'a> {
    result: &'a ResultSet,
    widths: Vec<usize>,
}

impl<'a> TableFormatter<'a> {
    pub fn new(result: &'a ResultSet) -> Self {
        let mut widths: Vec<usize> = result.headers.iter().map(|h| h.chars().count()).collect();
        for row in &result.rows {
            for (width, value) in widths.iter_mut().zip(row) {
                *width = (*width).max(value.to_string().chars().count());
            }
        }
        Self { result, widths }
    }

    #[must_use]
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Renders the header, the rule and up to `limit` rows, plus a note
    /// when rows were left out.
    pub fn render(&self, limit: RenderLimit) -> String {
        let mut output = String::new();

        self.write_line(&mut output, self.result.headers.iter().map(String::as_str));
        let rule: Vec<String> = self.widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(output, "{}", rule.join(RULE_SEPARATOR));

        let total = self.result.rows.len();
        let shown = if limit.is_unlimited() { total } else { total.min(limit.rows()) };
        for row in &self.result.rows[..shown] {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            self.write_line(&mut output, cells.iter().map(String::as_str));
        }

        if shown < total {
            let _ = writeln!(
                output,
                "... ({} rows not shown, use --limit 0 to show all)",
                total - shown
            );
        }
        output
    }

    fn write_line<'c>(&self, output: &mut String, cells: impl Iterator<Item = &'c str>) {
        let padded: Vec<String> = cells
            .zip(&self.widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(output, "{}", padded.join(COLUMN_SEPARATOR));
    }
}
