use crate::client::{Catalog, Connection};
use crate::core::{RenderLimit, ShellError};
use crate::executor::{Flow, MetaDispatcher, StatementExecutor};
use crate::parser::{split_batch, Accumulator, MetaCommand};
use log::{info, warn};
use std::io::Write;

/// Counts from a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// One connection, one output sink and the interactive input buffer.
///
/// Recoverable errors (rejected statements, meta-command usage) are written
/// to the sink and never escape; anything returned as `Err` is fatal.
pub struct Session<C, W> {
    conn: C,
    out: W,
    executor: StatementExecutor,
    dispatcher: MetaDispatcher,
    input: Accumulator,
}

impl<C, W> Session<C, W>
where
    C: Connection + Catalog,
    W: Write,
{
    pub fn new(conn: C, out: W, limit: RenderLimit) -> Self {
        Self {
            conn,
            out,
            executor: StatementExecutor::new(limit),
            dispatcher: MetaDispatcher::new(limit),
            input: Accumulator::new(),
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &'static str {
        self.input.prompt()
    }

    pub fn connection(&mut self) -> &mut C {
        &mut self.conn
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// Feeds one line of interactive input.
    ///
    /// Meta-commands are only recognised at the start of a statement; a
    /// prefixed line that names no known command is buffered as SQL.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        if self.input.is_empty() && MetaCommand::is_candidate(line) {
            match MetaCommand::parse(line) {
                Ok(Some(command)) => return self.run_meta(&command),
                Ok(None) => {}
                Err(err) => {
                    self.report(err)?;
                    return Ok(Flow::Continue);
                }
            }
        }

        if let Some(statement) = self.input.push_line(line) {
            self.run_statement(statement.as_str())?;
        }
        Ok(Flow::Continue)
    }

    /// Forgets any partially entered statement.
    pub fn discard_input(&mut self) {
        self.input.clear();
    }

    pub fn run_meta(&mut self, command: &MetaCommand) -> Result<Flow, ShellError> {
        match self.dispatcher.dispatch(&mut self.conn, command, &mut self.out) {
            Ok(flow) => Ok(flow),
            Err(err) => {
                self.report(err)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Returns `Ok(false)` when the database rejected the statement.
    pub fn run_statement(&mut self, sql: &str) -> Result<bool, ShellError> {
        match self.executor.execute(&mut self.conn, sql, &mut self.out) {
            Ok(()) => Ok(true),
            Err(err) => {
                self.report(err)?;
                Ok(false)
            }
        }
    }

    /// Executes every statement of a script in order, continuing past failures.
    pub fn run_batch(&mut self, script: &str) -> Result<BatchSummary, ShellError> {
        let statements = split_batch(script);
        let total = statements.len();
        let mut summary = BatchSummary::default();

        for (i, statement) in statements.iter().enumerate() {
            writeln!(self.out)?;
            writeln!(self.out, "-- [{}/{total}] Executing:", i + 1)?;
            writeln!(self.out, "{statement};")?;
            if self.run_statement(statement.as_str())? {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }
        }

        writeln!(self.out)?;
        writeln!(
            self.out,
            "({} succeeded, {} failed)",
            summary.succeeded, summary.failed
        )?;
        info!(
            "batch finished: {} succeeded, {} failed",
            summary.succeeded, summary.failed
        );
        Ok(summary)
    }

    /// Closes the connection and hands back the sink.
    pub fn close(self) -> Result<W, ShellError> {
        self.conn.close()?;
        Ok(self.out)
    }

    fn report(&mut self, err: ShellError) -> Result<(), ShellError> {
        match err {
            ShellError::Statement(msg) => {
                warn!("statement failed: {msg}");
                writeln!(self.out, "Database error: {msg}")?;
                Ok(())
            }
            ShellError::Usage(usage) => {
                writeln!(self.out, "{usage}")?;
                Ok(())
            }
            fatal => Err(fatal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{Call, FakeDatabase};
    use crate::core::Outcome;

    fn session() -> Session<FakeDatabase, Vec<u8>> {
        Session::new(FakeDatabase::default(), Vec::new(), RenderLimit::default())
    }

    fn output(session: &mut Session<FakeDatabase, Vec<u8>>) -> String {
        String::from_utf8(std::mem::take(session.writer())).unwrap()
    }

    #[test]
    fn test_multiline_statement_dispatched_once() {
        let mut s = session();
        assert_eq!(s.prompt(), "SQL> ");
        s.handle_line("SELECT 1").unwrap();
        assert_eq!(s.prompt(), " ... ");
        assert!(s.connection().calls.is_empty());
        s.handle_line("FROM DUAL;").unwrap();
        assert_eq!(
            s.connection().calls,
            vec![Call::Execute("SELECT 1\nFROM DUAL".to_string())]
        );
        assert_eq!(s.prompt(), "SQL> ");
    }

    #[test]
    fn test_commit_never_reaches_execute() {
        let mut s = session();
        s.handle_line("commit;").unwrap();
        s.handle_line("ROLLBACK;").unwrap();
        assert_eq!(s.connection().calls, vec![Call::Commit, Call::Rollback]);
    }

    #[test]
    fn test_error_resets_buffer() {
        let mut s = session();
        s.connection()
            .push_outcome(Err(ShellError::Statement("ORA-00942: table or view does not exist".to_string())));
        assert_eq!(s.handle_line("SELECT * FROM nope;").unwrap(), Flow::Continue);
        assert!(output(&mut s).contains("Database error: ORA-00942"));
        assert_eq!(s.prompt(), "SQL> ");

        s.handle_line("SELECT 2;").unwrap();
        assert_eq!(s.connection().calls.len(), 2);
    }

    #[test]
    fn test_meta_only_on_empty_buffer() {
        let mut s = session();
        s.handle_line("SELECT").unwrap();
        s.handle_line("\\q").unwrap();
        assert_eq!(s.prompt(), " ... ");
        s.handle_line(";").unwrap();
        assert_eq!(
            s.connection().calls,
            vec![Call::Execute("SELECT\n\\q".to_string())]
        );
    }

    #[test]
    fn test_quit_flow() {
        let mut s = session();
        assert_eq!(s.handle_line("  \\quit ").unwrap(), Flow::Quit);
    }

    #[test]
    fn test_unknown_meta_falls_through_to_sql() {
        let mut s = session();
        s.handle_line("\\dt;").unwrap();
        assert_eq!(s.connection().calls, vec![Call::Execute("\\dt".to_string())]);
    }

    #[test]
    fn test_usage_message_without_action() {
        let mut s = session();
        assert_eq!(s.handle_line("\\find").unwrap(), Flow::Continue);
        assert!(output(&mut s).starts_with("Usage: \\find <pattern>"));
        assert!(s.connection().calls.is_empty());
        assert_eq!(s.prompt(), "SQL> ");
    }

    #[test]
    fn test_discard_input() {
        let mut s = session();
        s.handle_line("SELECT 'unfinished").unwrap();
        s.discard_input();
        assert_eq!(s.prompt(), "SQL> ");
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let mut s = session();
        s.connection().push_outcome(Ok(Outcome::RowCount(1)));
        s.connection()
            .push_outcome(Err(ShellError::Statement("constraint failed".to_string())));
        s.connection().push_outcome(Ok(Outcome::RowCount(1)));

        let summary = s
            .run_batch("INSERT INTO t VALUES (1);\nINSERT INTO t VALUES (1);\nINSERT INTO t VALUES (2)")
            .unwrap();
        assert_eq!(summary, BatchSummary { succeeded: 2, failed: 1 });
        assert_eq!(s.connection().calls.len(), 3);

        let out = output(&mut s);
        assert!(out.contains("-- [2/3] Executing:\nINSERT INTO t VALUES (1);\nDatabase error: constraint failed\n"));
        assert!(out.contains("-- [3/3] Executing:\nINSERT INTO t VALUES (2);\n"));
        assert!(out.ends_with("(2 succeeded, 1 failed)\n"));
    }
}
