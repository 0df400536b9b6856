// sqlshell - interactive and batch SQL command runner
// Quote-aware statement splitting, meta-commands and tabular output

// Clippy configuration
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::multiple_crate_versions)]

// Core types (errors, values, result sets)
pub mod core;

// Statement segmentation, input accumulation, meta-command parsing
pub mod parser;

// Statement execution, meta-command dispatch, table rendering
pub mod executor;

// Database collaborators (SQLite)
pub mod client;

// Command-line arguments and configuration
pub mod args;
pub mod settings;

// Interactive and batch front ends
pub mod shell;

// Re-export commonly used types for convenience
pub use args::Args;
pub use client::{Catalog, Connection, SqliteConnection};
pub use crate::core::{Outcome, RenderLimit, ResultSet, ShellError, Value};
pub use executor::{Flow, MetaDispatcher, StatementExecutor, TableFormatter};
pub use parser::{split_batch, Accumulator, MetaCommand, Segmenter, Statement};
pub use settings::{ConnectionSettings, ShellConfig};
pub use shell::{BatchSummary, Repl, Session};
