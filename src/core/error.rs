use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    /// A required setting is absent; fatal before any connection is made.
    #[error("Missing configuration value: {0}")]
    Configuration(String),
    #[error("Connection failed: {0}")]
    Connection(String),
    /// The database rejected a statement. Recoverable.
    #[error("{0}")]
    Statement(String),
    #[error("{0}")]
    Usage(&'static str),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ShellError {
    /// Errors that end the current statement or command but not the loop.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Statement(_) | Self::Usage(_))
    }
}

impl From<rusqlite::Error> for ShellError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Statement(err.to_string())
    }
}
