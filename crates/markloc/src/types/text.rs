//! The text capability the parser and resolver are generic over.

use std::ops::Range;

/// A text representation directives can be resolved into.
///
/// The engine never inspects a concrete representation: it reads the plain
/// string through [`Text::plain`] and edits through byte ranges of that
/// string. A plain [`String`] and a [`crate::StyledText`] both implement
/// it, and they must behave identically with respect to the plain text.
///
/// Ranges passed to these methods always start and end on `char`
/// boundaries of `plain()`.
///
/// # Example
///
/// ```
/// use markloc::Text;
///
/// let mut text = String::from("hello |name|");
/// let inserted = text.splice(6..12, "world".to_string());
/// assert_eq!(inserted, "world");
/// assert_eq!(text.plain(), "hello world");
/// ```
pub trait Text: Clone {
    /// Returns the plain string this value represents.
    fn plain(&self) -> &str;

    /// Returns a copy of the given range.
    fn slice(&self, range: Range<usize>) -> Self;

    /// Removes the given range.
    fn delete(&mut self, range: Range<usize>);

    /// Replaces the given range with `replacement`, returning the plain
    /// string that was inserted.
    fn splice(&mut self, range: Range<usize>, replacement: Self) -> String;
}

impl Text for String {
    fn plain(&self) -> &str {
        self
    }

    fn slice(&self, range: Range<usize>) -> Self {
        self[range].to_string()
    }

    fn delete(&mut self, range: Range<usize>) {
        self.replace_range(range, "");
    }

    fn splice(&mut self, range: Range<usize>, replacement: Self) -> String {
        self.replace_range(range, &replacement);
        replacement
    }
}
