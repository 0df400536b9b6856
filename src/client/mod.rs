//! Database collaborators.
//!
//! The shell drives a connection through two traits: [`Connection`] for
//! statement execution and transaction control, and [`Catalog`] for the
//! introspection queries behind the meta-commands.

pub mod sqlite;
#[cfg(test)]
pub(crate) mod testing;

pub use sqlite::SqliteConnection;

use crate::core::{Outcome, ResultSet, ShellError};
use crate::parser::DescribeTarget;

pub const TABLE_HEADERS: &[&str] = &["OWNER", "TABLE_NAME"];
pub const SCHEMA_HEADERS: &[&str] = &["OWNER"];
pub const DESCRIBE_HEADERS: &[&str] = &[
    "OWNER", "TABLE", "POS", "COLUMN", "TYPE", "NULL?", "DEFAULT", "PK",
];
pub const FIND_HEADERS: &[&str] = &["OWNER", "TABLE", "COLUMN", "TYPE"];

pub trait Connection {
    /// Runs one statement verbatim. Errors are `ShellError::Statement`.
    fn execute(&mut self, sql: &str) -> Result<Outcome, ShellError>;

    fn commit(&mut self) -> Result<(), ShellError>;

    fn rollback(&mut self) -> Result<(), ShellError>;

    /// Releases the connection. Uncommitted work is rolled back.
    fn close(self) -> Result<(), ShellError>
    where
        Self: Sized;
}

/// Read-only catalog lookups. Patterns use `LIKE` wildcards and match
/// case-insensitively.
pub trait Catalog {
    fn list_tables(&mut self, pattern: Option<&str>) -> Result<ResultSet, ShellError>;

    fn list_schemas(&mut self) -> Result<ResultSet, ShellError>;

    fn describe_table(&mut self, target: &DescribeTarget) -> Result<ResultSet, ShellError>;

    fn find_columns(&mut self, pattern: &str) -> Result<ResultSet, ShellError>;
}
