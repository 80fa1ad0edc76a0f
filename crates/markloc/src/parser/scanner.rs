//! Delimiter search honouring escape tokens.
//!
//! An occurrence of a delimiter is escaped when it is preceded by an odd
//! number of consecutive escape tokens: with `~` as the escape token, `~|` is
//! a literal bar while `~~|` is an escaped tilde followed by a live bar.
//! Matches must also start and end on grapheme cluster boundaries, so a
//! delimiter never splits a combining sequence.

use std::ops::Range;

use unicode_segmentation::GraphemeCursor;

/// Returns whether the occurrence starting at `position` is escaped.
///
/// # Example
///
/// ```
/// use markloc::parser::is_escaped;
///
/// assert!(is_escaped("a~|", 2, Some("~")));
/// assert!(!is_escaped("a~~|", 3, Some("~")));
/// assert!(!is_escaped("a~|", 2, None));
/// ```
pub fn is_escaped(text: &str, position: usize, escape: Option<&str>) -> bool {
    let Some(escape) = escape.filter(|e| !e.is_empty()) else {
        return false;
    };
    let mut count = 0_usize;
    let mut before = &text[..position];
    while let Some(rest) = before.strip_suffix(escape) {
        count += 1;
        before = rest;
    }
    count % 2 == 1
}

/// Finds the next unescaped occurrence of `delimiter` at or after `from`.
pub fn find_unescaped(
    text: &str,
    delimiter: &str,
    escape: Option<&str>,
    from: usize,
) -> Option<Range<usize>> {
    if delimiter.is_empty() {
        return None;
    }
    let mut start = from;
    while start <= text.len() {
        let found = start + text.get(start..)?.find(delimiter)?;
        let range = found..found + delimiter.len();
        if on_grapheme_boundary(text, range.start)
            && on_grapheme_boundary(text, range.end)
            && !is_escaped(text, found, escape)
        {
            return Some(range);
        }
        start = if is_escaped(text, found, escape) {
            range.end
        } else {
            found + text[found..].chars().next().map_or(1, char::len_utf8)
        };
    }
    None
}

/// Finds the next `left … right` pair at or after `from`.
///
/// Returns the range of the opening delimiter and, when one follows, the
/// range of the closing delimiter. `Some((open, None))` means the text has an
/// opening delimiter that is never closed.
pub fn find_pair(
    text: &str,
    left: &str,
    right: &str,
    escape: Option<&str>,
    from: usize,
) -> Option<(Range<usize>, Option<Range<usize>>)> {
    let open = find_unescaped(text, left, escape, from)?;
    let close = find_unescaped(text, right, escape, open.end);
    Some((open, close))
}

fn on_grapheme_boundary(text: &str, offset: usize) -> bool {
    if !text.is_char_boundary(offset) {
        return false;
    }
    GraphemeCursor::new(offset, text.len(), true)
        .is_boundary(text, 0)
        .unwrap_or(true)
}
