//! SQLite implementation of the database collaborators.
//!
//! Transaction control is manual: the first writing statement after a
//! commit or rollback opens a deferred transaction, and nothing is committed
//! until `COMMIT;` is issued. Reads and pragmas run in autocommit. Schema names (`main`, `temp` and attached
//! databases) play the role of owners in catalog lookups.

use super::{Catalog, Connection, DESCRIBE_HEADERS, FIND_HEADERS, SCHEMA_HEADERS, TABLE_HEADERS};
use crate::core::{Outcome, ResultSet, ShellError, Value};
use crate::parser::DescribeTarget;
use crate::settings::ConnectionSettings;
use log::{debug, info, warn};
use std::fmt;
use rusqlite::{params, OpenFlags, Params};

/// Statements SQLite refuses, or changes meaning of, inside a transaction.
const AUTOCOMMIT_ONLY: &[&str] = &["ATTACH", "DETACH", "VACUUM", "BEGIN", "PRAGMA"];

const LIST_TABLES_SQL: &str = r"
    SELECT t.schema, t.name
      FROM pragma_table_list AS t
     WHERE t.type = 'table'
       AND t.name NOT LIKE 'sqlite\_%' ESCAPE '\'
       AND (?1 IS NULL OR UPPER(t.name) LIKE ?1)
     ORDER BY t.schema, t.name";

// `temp` is only listed once it has been created; it is always an owner.
const LIST_SCHEMAS_SQL: &str = "SELECT name FROM pragma_database_list UNION SELECT 'temp' ORDER BY 1";

const DESCRIBE_SQL: &str = r#"
    SELECT t.schema,
           t.name,
           c.cid + 1,
           c.name,
           c.type,
           CASE c."notnull" WHEN 0 THEN 'Y' ELSE 'N' END,
           c.dflt_value,
           c.pk
      FROM pragma_table_list AS t
      JOIN pragma_table_info(t.name, t.schema) AS c
     WHERE t.type IN ('table', 'view')
       AND UPPER(t.name) = ?1
       AND (?2 IS NULL OR UPPER(t.schema) LIKE ?2)
     ORDER BY t.schema, t.name, c.cid"#;

const FIND_COLUMNS_SQL: &str = r"
    SELECT t.schema, t.name, c.name, c.type
      FROM pragma_table_list AS t
      JOIN pragma_table_info(t.name, t.schema) AS c
     WHERE t.type IN ('table', 'view')
       AND t.name NOT LIKE 'sqlite\_%' ESCAPE '\'
       AND UPPER(c.name) LIKE ?1
     ORDER BY t.schema, t.name, c.cid";

pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl SqliteConnection {
    /// Opens the configured database and attaches any extra schemas.
    pub fn open(settings: &ConnectionSettings) -> Result<Self, ShellError> {
        let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if settings.create {
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        }

        let conn = rusqlite::Connection::open_with_flags(&settings.database, flags)
            .map_err(|e| ShellError::Connection(format!("{}: {e}", settings.database)))?;
        let mut shell = Self { conn };

        for (schema, path) in &settings.attach {
            shell
                .attach(schema, path)
                .map_err(|e| ShellError::Connection(format!("attach {schema} ({path}): {e}")))?;
        }

        info!("opened database {}", settings.database);
        Ok(shell)
    }

    pub fn open_in_memory() -> Result<Self, ShellError> {
        let conn = rusqlite::Connection::open_in_memory()
            .map_err(|e| ShellError::Connection(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Makes another database file visible under `schema`.
    pub fn attach(&mut self, schema: &str, path: &str) -> Result<(), ShellError> {
        self.conn.execute("ATTACH DATABASE ?1 AS ?2", params![path, schema])?;
        debug!("attached {path} as {schema}");
        Ok(())
    }

    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.conn.is_autocommit()
    }

    fn begin_if_needed(&self, sql: &str, readonly: bool) -> Result<(), ShellError> {
        if readonly || self.in_transaction() || runs_outside_transaction(sql) {
            return Ok(());
        }
        debug!("opening implicit transaction");
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    fn total_changes(&self) -> Result<i64, ShellError> {
        Ok(self.conn.query_row("SELECT total_changes()", [], |row| row.get(0))?)
    }

    fn catalog_query<P: Params>(
        &self,
        sql: &str,
        params: P,
        headers: &[&str],
    ) -> Result<ResultSet, ShellError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, |row| {
                (0..headers.len())
                    .map(|i| row.get_ref(i).map(Value::from))
                    .collect::<rusqlite::Result<Vec<Value>>>()
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ResultSet::with_headers(headers, rows))
    }
}

fn runs_outside_transaction(sql: &str) -> bool {
    sql.split_whitespace()
        .next()
        .is_some_and(|word| AUTOCOMMIT_ONLY.iter().any(|k| word.eq_ignore_ascii_case(k)))
}

fn close_failed(err: impl fmt::Display) -> ShellError {
    warn!("close failed: {err}");
    ShellError::Connection(err.to_string())
}

impl Connection for SqliteConnection {
    fn execute(&mut self, sql: &str) -> Result<Outcome, ShellError> {
        let before = self.total_changes()?;
        let mut stmt = self.conn.prepare(sql)?;
        self.begin_if_needed(sql, stmt.readonly())?;

        if stmt.column_count() == 0 {
            let changed = stmt.execute([])?;
            drop(stmt);
            // DDL leaves the last DML count in place; only report real changes.
            let affected = if self.total_changes()? == before { 0 } else { changed };
            return Ok(Outcome::RowCount(affected));
        }

        let headers: Vec<String> = stmt.column_names().into_iter().map(str::to_string).collect();
        let width = headers.len();
        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let values = (0..width)
                .map(|i| row.get_ref(i).map(Value::from))
                .collect::<rusqlite::Result<Vec<Value>>>()?;
            rows.push(values);
        }
        Ok(Outcome::Rows(ResultSet::new(headers, rows)))
    }

    fn commit(&mut self) -> Result<(), ShellError> {
        if self.in_transaction() {
            self.conn.execute_batch("COMMIT")?;
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), ShellError> {
        if self.in_transaction() {
            self.conn.execute_batch("ROLLBACK")?;
        }
        Ok(())
    }

    fn close(mut self) -> Result<(), ShellError> {
        if self.in_transaction() {
            info!("rolling back uncommitted work before close");
            self.rollback().map_err(close_failed)?;
        }
        self.conn.close().map_err(|(_, e)| close_failed(e))?;
        info!("connection closed");
        Ok(())
    }
}

impl Catalog for SqliteConnection {
    fn list_tables(&mut self, pattern: Option<&str>) -> Result<ResultSet, ShellError> {
        let pattern = pattern.map(str::to_uppercase);
        self.catalog_query(LIST_TABLES_SQL, params![pattern], TABLE_HEADERS)
    }

    fn list_schemas(&mut self) -> Result<ResultSet, ShellError> {
        self.catalog_query(LIST_SCHEMAS_SQL, [], SCHEMA_HEADERS)
    }

    fn describe_table(&mut self, target: &DescribeTarget) -> Result<ResultSet, ShellError> {
        let table = target.table.to_uppercase();
        let owner = target.owner.as_deref().map(str::to_uppercase);
        self.catalog_query(DESCRIBE_SQL, params![table, owner], DESCRIBE_HEADERS)
    }

    fn find_columns(&mut self, pattern: &str) -> Result<ResultSet, ShellError> {
        self.catalog_query(FIND_COLUMNS_SQL, params![pattern.to_uppercase()], FIND_HEADERS)
    }
}
