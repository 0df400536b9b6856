//! In-memory collaborator that records every call.

use super::{Catalog, Connection, DESCRIBE_HEADERS, FIND_HEADERS, SCHEMA_HEADERS, TABLE_HEADERS};
use crate::core::{Outcome, ResultSet, ShellError, Value};
use crate::parser::DescribeTarget;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Execute(String),
    Commit,
    Rollback,
    ListTables(Option<String>),
    ListSchemas,
    Describe(DescribeTarget),
    FindColumns(String),
}

/// Queued outcomes are returned in order; once empty, `execute` reports zero rows affected.
#[derive(Debug, Default)]
pub struct FakeDatabase {
    pub calls: Vec<Call>,
    pub outcomes: VecDeque<Result<Outcome, ShellError>>,
    pub tables: Vec<Vec<Value>>,
    pub schemas: Vec<Vec<Value>>,
    pub columns: Vec<Vec<Value>>,
    pub matches: Vec<Vec<Value>>,
}

impl FakeDatabase {
    pub fn push_outcome(&mut self, outcome: Result<Outcome, ShellError>) {
        self.outcomes.push_back(outcome);
    }

    pub fn push_rows(&mut self, headers: &[&str], rows: Vec<Vec<Value>>) {
        self.push_outcome(Ok(Outcome::Rows(ResultSet::with_headers(headers, rows))));
    }
}

impl Connection for FakeDatabase {
    fn execute(&mut self, sql: &str) -> Result<Outcome, ShellError> {
        self.calls.push(Call::Execute(sql.to_string()));
        self.outcomes.pop_front().unwrap_or(Ok(Outcome::RowCount(0)))
    }

    fn commit(&mut self) -> Result<(), ShellError> {
        self.calls.push(Call::Commit);
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), ShellError> {
        self.calls.push(Call::Rollback);
        Ok(())
    }

    fn close(self) -> Result<(), ShellError> {
        Ok(())
    }
}

impl Catalog for FakeDatabase {
    fn list_tables(&mut self, pattern: Option<&str>) -> Result<ResultSet, ShellError> {
        self.calls.push(Call::ListTables(pattern.map(str::to_string)));
        Ok(ResultSet::with_headers(TABLE_HEADERS, self.tables.clone()))
    }

    fn list_schemas(&mut self) -> Result<ResultSet, ShellError> {
        self.calls.push(Call::ListSchemas);
        Ok(ResultSet::with_headers(SCHEMA_HEADERS, self.schemas.clone()))
    }

    fn describe_table(&mut self, target: &DescribeTarget) -> Result<ResultSet, ShellError> {
        self.calls.push(Call::Describe(target.clone()));
        Ok(ResultSet::with_headers(DESCRIBE_HEADERS, self.columns.clone()))
    }

    fn find_columns(&mut self, pattern: &str) -> Result<ResultSet, ShellError> {
        self.calls.push(Call::FindColumns(pattern.to_string()));
        Ok(ResultSet::with_headers(FIND_HEADERS, self.matches.clone()))
    }
}
