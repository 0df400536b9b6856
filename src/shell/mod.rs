// Interactive and batch front ends over a single session
pub mod session;
pub mod repl;

pub use session::{BatchSummary, Session};
pub use repl::Repl;
