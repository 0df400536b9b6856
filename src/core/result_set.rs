use super::value::Value;

/// Column headers plus rows, as produced by a query-class statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { headers, rows }
    }

    /// Builds a result set with fixed catalog headers.
    pub fn with_headers(headers: &[&str], rows: Vec<Vec<Value>>) -> Self {
        Self {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// What a generic statement produced: rows with column metadata, or an affected-row count.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Rows(ResultSet),
    RowCount(usize),
}

/// Maximum number of rows shown per result. Zero means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderLimit(usize);

impl RenderLimit {
    pub const UNLIMITED: Self = Self(0);

    #[must_use]
    pub const fn new(rows: usize) -> Self {
        Self(rows)
    }

    /// Negative limits from the command line mean "show everything".
    #[must_use]
    pub fn from_signed(rows: i64) -> Self {
        Self(usize::try_from(rows).unwrap_or(0))
    }

    #[must_use]
    pub const fn rows(self) -> usize {
        self.0
    }

    #[must_use]
    pub const fn is_unlimited(self) -> bool {
        self.0 == 0
    }
}

impl Default for RenderLimit {
    fn default() -> Self {
        Self(200)
    }
}
