// Module declarations
pub mod error;
pub mod value;
pub mod result_set;

// Re-exports for convenience
pub use error::ShellError;
pub use value::Value;
pub use result_set::{Outcome, RenderLimit, ResultSet};
