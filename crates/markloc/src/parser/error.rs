//! Recoverable diagnostics produced while parsing a template.

use std::ops::Range;

use thiserror::Error;

use crate::plurality::PluralityParseError;

/// A problem found while parsing a template.
///
/// None of these abort a parse: the offending markup is left in the text as
/// literal characters and the rest of the template is still parsed. Offsets
/// are byte offsets into the source as it was given to the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    /// An opening delimiter without a closing one. Scanning for that token
    /// stops at this point.
    #[error("'{opening}' at offset {offset} is never closed by '{closing}'")]
    UnmatchedDelimiter {
        token: String,
        opening: String,
        closing: String,
        offset: usize,
    },

    /// The text starts with `||` but no second `||` ends the override block.
    #[error("plurality override block is not terminated by '||'")]
    UnterminatedPluralityOverride,

    /// One entry of the override block is not a valid definition; that plural
    /// group keeps the default plurality.
    #[error("plurality override #{index} '{definition}' is invalid: {error}")]
    InvalidPluralityDefinition {
        index: usize,
        definition: String,
        error: PluralityParseError,
    },

    /// A directive partially overlaps another directive it cannot nest with.
    /// The whole directive group is ignored.
    #[error(
        "'{token}' at {}..{} partially overlaps another directive",
        container.start,
        container.end
    )]
    InvalidOverlap {
        token: String,
        container: Range<usize>,
    },
}

impl ParseWarning {
    /// The part of the source this warning is about, when there is one.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            ParseWarning::UnmatchedDelimiter {
                opening, offset, ..
            } => Some(*offset..*offset + opening.len()),
            ParseWarning::UnterminatedPluralityOverride => Some(0..2),
            ParseWarning::InvalidPluralityDefinition { .. } => None,
            ParseWarning::InvalidOverlap { container, .. } => Some(container.clone()),
        }
    }

    /// Moves the offsets of this warning by `delta` bytes.
    pub(crate) fn shifted(self, delta: usize) -> Self {
        match self {
            ParseWarning::UnmatchedDelimiter {
                token,
                opening,
                closing,
                offset,
            } => ParseWarning::UnmatchedDelimiter {
                token,
                opening,
                closing,
                offset: offset + delta,
            },
            ParseWarning::InvalidOverlap { token, container } => ParseWarning::InvalidOverlap {
                token,
                container: container.start + delta..container.end + delta,
            },
            other @ (ParseWarning::UnterminatedPluralityOverride
            | ParseWarning::InvalidPluralityDefinition { .. }) => other,
        }
    }
}
