//! Error types for token configuration and resolution.

use thiserror::Error;

use crate::parser::TokenKind;

/// A token configuration that cannot be parsed unambiguously.
///
/// Returned by the [`crate::ParsingInfo`] and [`crate::ResolvingInfo`]
/// builders; no template is ever parsed with such a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A delimiter is the empty string.
    #[error("{kind} token '{token}' has an empty delimiter")]
    EmptyDelimiter { kind: TokenKind, token: String },

    /// A triple token whose separator equals its opening or closing
    /// delimiter.
    #[error("token '{token}' uses its separator as an outer delimiter")]
    AmbiguousInterior { token: String },

    /// Two different tokens share a delimiter string.
    #[error("delimiter '{delimiter}' is used by both {first} and {second}")]
    ConflictingDelimiter {
        delimiter: String,
        first: String,
        second: String,
    },

    /// The same plural group token is given twice.
    #[error("plural group '{token}' is listed more than once")]
    DuplicatePluralGroup { token: String },

    /// The escape token occurs inside a delimiter, which could then never be
    /// matched unescaped.
    #[error("escape token '{escape}' occurs in a delimiter of '{token}'")]
    EscapeConflict { escape: String, token: String },
}

/// A problem found while resolving a template.
///
/// Resolution always produces an output; these describe what was left
/// unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveWarning {
    /// A directive whose token has no value in the resolving info. Its markup
    /// is left in the output.
    #[error("no value given for {kind} '{token}'")]
    MissingValue { kind: TokenKind, token: String },

    /// A conversion or attribute handler changed the plain text, so the
    /// remaining directives cannot be located. Resolution stops here.
    #[error("{kind} '{token}' changed the text it was applied to")]
    TextChanged { kind: TokenKind, token: String },
}
