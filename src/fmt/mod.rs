//! Message text helpers used by the printer before a record is routed.

mod chain;
mod printf;

pub use chain::render_chain;
pub use printf::{Arg, FormatError, MAX_WIDTH, sprintf};
