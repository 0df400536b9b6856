use super::statement::write_table;
use crate::client::Catalog;
use crate::core::{RenderLimit, ResultSet, ShellError};
use crate::parser::meta::help_text;
use crate::parser::MetaCommand;
use log::debug;
use std::io::Write;

pub const NO_COLUMNS_FOUND: &str = "No columns found (check OWNER/TABLE).";
pub const NO_MATCHES_FOUND: &str = "No matching columns found.";

/// Whether the interactive loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs meta-commands against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct MetaDispatcher {
    limit: RenderLimit,
}

impl MetaDispatcher {
    #[must_use]
    pub const fn new(limit: RenderLimit) -> Self {
        Self { limit }
    }

    pub fn dispatch<C, W>(
        &self,
        catalog: &mut C,
        command: &MetaCommand,
        out: &mut W,
    ) -> Result<Flow, ShellError>
    where
        C: Catalog + ?Sized,
        W: Write + ?Sized,
    {
        debug!("meta-command: {command:?}");
        match command {
            MetaCommand::Quit => {
                writeln!(out, "Bye.")?;
                return Ok(Flow::Quit);
            }
            MetaCommand::Help => writeln!(out, "{}", help_text())?,
            MetaCommand::ListTables(pattern) => {
                let tables = catalog.list_tables(pattern.as_deref())?;
                summarize(out, &tables, self.limit, "tables")?;
            }
            MetaCommand::ListSchemas => {
                let schemas = catalog.list_schemas()?;
                summarize(out, &schemas, RenderLimit::UNLIMITED, "schemas")?;
            }
            MetaCommand::Describe(target) => {
                let columns = catalog.describe_table(target)?;
                if columns.is_empty() {
                    writeln!(out, "{NO_COLUMNS_FOUND}")?;
                } else {
                    summarize(out, &columns, RenderLimit::UNLIMITED, "columns")?;
                }
            }
            MetaCommand::FindColumns(pattern) => {
                let matches = catalog.find_columns(pattern)?;
                if matches.is_empty() {
                    writeln!(out, "{NO_MATCHES_FOUND}")?;
                } else {
                    summarize(out, &matches, self.limit, "matches")?;
                }
            }
        }
        Ok(Flow::Continue)
    }
}

fn summarize<W: Write + ?Sized>(
    out: &mut W,
    result: &ResultSet,
    limit: RenderLimit,
    noun: &str,
) -> Result<(), ShellError> {
    write_table(out, result, limit)?;
    writeln!(out)?;
    writeln!(out, "({} {noun})", result.len())?;
    Ok(())
}
