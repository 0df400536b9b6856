use crate::core::ShellError;

/// First character of every meta-command.
pub const META_PREFIX: char = '\\';

pub const DESCRIBE_USAGE: &str = "Usage: \\d <table> or \\d <owner.table>";
pub const FIND_USAGE: &str = "Usage: \\find <pattern>   (use % as wildcard, e.g. %CODE%)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    Quit,
    Help,
    ListTables(Option<String>),
    ListSchemas,
    Describe(DescribeTarget),
    FindColumns(String),
}

/// `owner.table` or bare `table`, upper-cased. A missing owner matches any owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeTarget {
    pub owner: Option<String>,
    pub table: String,
}

impl DescribeTarget {
    pub fn parse(target: &str) -> Self {
        match target.split_once('.') {
            Some((owner, table)) => Self {
                owner: (!owner.is_empty()).then(|| owner.to_uppercase()),
                table: table.to_uppercase(),
            },
            None => Self {
                owner: None,
                table: target.to_uppercase(),
            },
        }
    }
}

impl MetaCommand {
    /// Whether a line should be offered to [`MetaCommand::parse`] at all.
    pub fn is_candidate(line: &str) -> bool {
        line.trim_start().starts_with(META_PREFIX)
    }

    /// Parses a meta-command line.
    ///
    /// `Ok(None)` means the first token is not a known command and the line
    /// should be treated as SQL. A known command missing its argument yields
    /// `ShellError::Usage`.
    pub fn parse(line: &str) -> Result<Option<Self>, ShellError> {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            return Ok(None);
        };
        let arg = parts.next();

        let command = match cmd {
            "\\q" | "\\quit" | "\\exit" => Self::Quit,
            "\\help" | "\\h" => Self::Help,
            "\\tables" => Self::ListTables(arg.map(str::to_string)),
            "\\schemas" => Self::ListSchemas,
            "\\d" | "\\desc" | "\\describe" => {
                let target = arg.ok_or(ShellError::Usage(DESCRIBE_USAGE))?;
                Self::Describe(DescribeTarget::parse(target))
            }
            "\\find" | "\\search" => {
                let pattern = arg.ok_or(ShellError::Usage(FIND_USAGE))?;
                Self::FindColumns(pattern.to_string())
            }
            _ => return Ok(None),
        };
        Ok(Some(command))
    }
}

pub fn help_text() -> &'static str {
    r"Special commands:
  \q, \quit, \exit          quit
  \help, \h                 show this help
  \tables [pattern]         list tables, optionally filtered with LIKE
  \schemas                  list schemas (owners)
  \d <owner.table|table>    describe the columns of a table
  \find <pattern>           search columns by name
Note: end statements with ';'. Use COMMIT; or ROLLBACK; after DML."
}
