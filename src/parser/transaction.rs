/// Statements that bypass the generic execute path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionControl {
    Commit,
    Rollback,
}

impl TransactionControl {
    /// Matches only the bare keywords, case-insensitively. `COMMIT WORK` and
    /// friends go to the database verbatim.
    pub fn classify(sql: &str) -> Option<Self> {
        match sql.trim().to_uppercase().as_str() {
            "COMMIT" => Some(Self::Commit),
            "ROLLBACK" => Some(Self::Rollback),
            _ => None,
        }
    }
}
