use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// A token bounded by a single delimiter used on both sides.
///
/// Single tokens mark simple substitutions (`|name|`) and attribute spans
/// (`*bold*`).
///
/// # Example
///
/// ```
/// use markloc::SingleToken;
///
/// let bold = SingleToken::new("*");
/// assert_eq!(bold.token(), "*");
/// assert_eq!(bold.to_string(), "*…*");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SingleToken {
    token: String,
}

impl SingleToken {
    /// Creates a token from its delimiter.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The delimiter, used both as the opening and the closing marker.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the opening delimiter.
    pub fn left(&self) -> &str {
        &self.token
    }

    /// Returns the closing delimiter.
    pub fn right(&self) -> &str {
        &self.token
    }
}

impl Display for SingleToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{0}…{0}", self.token)
    }
}

/// A token with an opening, a repeatable interior and a closing delimiter.
///
/// Triple tokens mark multi-arm directives: ordered alternatives
/// (`{him₋her}`) and plural groups (`<apple:apples>`).
///
/// # Example
///
/// ```
/// use markloc::TripleToken;
///
/// let plural = TripleToken::new("<", ":", ">");
/// assert_eq!(plural.interior(), ":");
/// assert_eq!(plural.to_string(), "<…:…>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TripleToken {
    left: String,
    interior: String,
    right: String,
}

impl TripleToken {
    /// Creates a token from its opening, interior and closing delimiters.
    pub fn new(
        left: impl Into<String>,
        interior: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self {
            left: left.into(),
            interior: interior.into(),
            right: right.into(),
        }
    }

    /// Returns the opening delimiter.
    pub fn left(&self) -> &str {
        &self.left
    }

    /// Returns the separator between two arms.
    pub fn interior(&self) -> &str {
        &self.interior
    }

    /// Returns the closing delimiter.
    pub fn right(&self) -> &str {
        &self.right
    }

    /// Returns the three delimiters in order.
    pub fn delimiters(&self) -> [&str; 3] {
        [&self.left, &self.interior, &self.right]
    }
}

impl Display for TripleToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}…{}…{}", self.left, self.interior, self.right)
    }
}
