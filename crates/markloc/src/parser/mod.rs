//! Template parsing: token scanning, directive tree building and
//! untokenization.

mod error;
mod extract;
mod parsed;
mod scanner;
mod tree;
mod untokenize;

pub use error::ParseWarning;
pub use parsed::ParsedTemplate;
pub use scanner::{find_pair, find_unescaped, is_escaped};
pub use tree::{Directive, DirectiveKind, DirectiveTree, NodeId, TokenKind};
