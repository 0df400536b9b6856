/// Executor module - runs completed statements and meta-commands
///
/// Structure:
/// - statement: COMMIT/ROLLBACK shortcut and the generic execute path
/// - meta: catalog-backed meta-commands
/// - table: fixed-width result rendering
pub mod statement;
pub mod meta;
pub mod table;

pub use statement::StatementExecutor;
pub use meta::{Flow, MetaDispatcher};
pub use table::TableFormatter;
