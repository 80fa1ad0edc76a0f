//! CLI command implementations.

mod apply;
mod check;
mod escape;
mod tree;

pub use apply::{ApplyArgs, run_apply};
pub use check::{CheckArgs, run_check};
pub use escape::{EscapeArgs, run_escape};
pub use tree::{TreeArgs, run_tree};
