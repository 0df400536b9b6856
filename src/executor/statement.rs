use super::table::TableFormatter;
use crate::client::Connection;
use crate::core::{Outcome, RenderLimit, ResultSet, ShellError};
use crate::parser::{TransactionControl, TERMINATOR};
use log::debug;
use std::io::Write;

pub const COMMIT_MESSAGE: &str = "COMMIT complete.";
pub const ROLLBACK_MESSAGE: &str = "ROLLBACK complete.";
pub const MANUAL_COMMIT_HINT: &str = "Hint: use COMMIT; to confirm, ROLLBACK; to undo.";

/// Routes a finished statement to transaction control or the generic
/// execute path and writes the outcome.
#[derive(Debug, Clone, Copy)]
pub struct StatementExecutor {
    limit: RenderLimit,
}

impl StatementExecutor {
    #[must_use]
    pub const fn new(limit: RenderLimit) -> Self {
        Self { limit }
    }

    /// Database errors come back as `ShellError::Statement` for the caller to report.
    pub fn execute<C, W>(&self, conn: &mut C, sql: &str, out: &mut W) -> Result<(), ShellError>
    where
        C: Connection + ?Sized,
        W: Write + ?Sized,
    {
        let sql = sql.trim().trim_end_matches(TERMINATOR).trim();
        if sql.is_empty() {
            return Ok(());
        }

        if let Some(control) = TransactionControl::classify(sql) {
            debug!("transaction control: {control:?}");
            match control {
                TransactionControl::Commit => {
                    conn.commit()?;
                    writeln!(out, "{COMMIT_MESSAGE}")?;
                }
                TransactionControl::Rollback => {
                    conn.rollback()?;
                    writeln!(out, "{ROLLBACK_MESSAGE}")?;
                }
            }
            return Ok(());
        }

        debug!("executing: {sql}");
        match conn.execute(sql)? {
            Outcome::Rows(result) => {
                write_table(out, &result, self.limit)?;
                writeln!(out)?;
                writeln!(out, "({} rows)", result.len())?;
            }
            Outcome::RowCount(affected) => {
                writeln!(out, "Statement executed. Rows affected: {affected}.")?;
                writeln!(out, "{MANUAL_COMMIT_HINT}")?;
            }
        }
        Ok(())
    }
}

pub fn write_table<W: Write + ?Sized>(
    out: &mut W,
    result: &ResultSet,
    limit: RenderLimit,
) -> Result<(), ShellError> {
    out.write_all(TableFormatter::new(result).render(limit).as_bytes())?;
    Ok(())
}
