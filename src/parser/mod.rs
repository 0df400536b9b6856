// Module declarations
mod statement;
pub mod segmenter;
pub mod accumulator;
pub mod meta;
pub mod transaction;

// Re-export all public types
pub use statement::Statement;
pub use segmenter::{split_batch, QuoteState, Segmenter, TERMINATOR};
pub use accumulator::Accumulator;
pub use meta::{DescribeTarget, MetaCommand};
pub use transaction::TransactionControl;
