//! Token-based text templating.
//!
//! A template is a piece of text marked up with configurable tokens:
//! substitutions (`|name|`), ordered alternatives (`{he₋she}`), plural
//! groups (`<message:messages>`) and attribute spans (`*bold*`). Tokens may
//! nest. Parsing builds a tree of directives over the untokenized text;
//! resolving walks that tree against runtime values, innermost first.
//!
//! # Example
//!
//! ```
//! use markloc::{CommonTokens, Number};
//!
//! let tokens = CommonTokens::builder()
//!     .simple_replacement_1("Bob")
//!     .number(Number::int(1))
//!     .build();
//! assert_eq!(
//!     tokens.apply("|name| has #n# <apple:apples>").unwrap(),
//!     "Bob has 1 apples",
//! );
//! ```
//!
//! Plural groups without an explicit plurality always pick their last zone.
//! Give one at the start of the template, or through [`Config`]:
//!
//! ```
//! use markloc::{CommonTokens, Number};
//!
//! let tokens = CommonTokens::builder().number(Number::int(1)).build();
//! assert_eq!(
//!     tokens.apply("||(1)||#n# <apple:apples>").unwrap(),
//!     "1 apple",
//! );
//! ```

pub mod config;
pub mod parser;
pub mod plurality;
pub mod resolver;
pub mod tokens;
pub mod types;

pub use config::Config;
pub use parser::{
    Directive, DirectiveKind, DirectiveTree, NodeId, ParseWarning, ParsedTemplate, TokenKind,
};
pub use plurality::{CldrPlurality, PluralValue, Plurality, PluralityDefinition};
pub use resolver::{
    AttributeFn, ConfigError, IdentityFn, InputFn, OutputFn, ParsingInfo, ResolveContext,
    ResolveWarning, ResolvingInfo, constant, identity, styled_identity, substitution,
};
pub use tokens::{CommonTokens, Number};
pub use types::{
    AttributeChange, Attributes, AttributesChanges, Color, ColorParseError, Font, SingleToken,
    StyledText, Text, TripleToken,
};
