//! Removal of markup that never survives resolution.
//!
//! Escape tokens are always removed (a doubled escape leaves one literal
//! copy). Attribute spans lose their delimiters up front since applying
//! attributes never changes the length of the text; every other directive
//! keeps its delimiters until it is resolved.

use tracing::trace;

use super::tree::DirectiveTree;
use crate::resolver::walker::Walker;
use crate::types::Text;

/// Strips escapes and attribute delimiters from `source`, keeping `tree` in
/// step with the edits. Returns the untokenized source and its tree.
pub(crate) fn untokenize<S: Text>(
    mut source: S,
    tree: DirectiveTree,
    escape: Option<&str>,
) -> (S, DirectiveTree) {
    let mut walker = Walker::new(tree, source.plain().to_string());

    if let Some(escape) = escape.filter(|e| !e.is_empty()) {
        let mut position = 0;
        while let Some(found) = walker.text().get(position..).and_then(|rest| rest.find(escape)) {
            let start = position + found;
            let range = start..start + escape.len();
            trace!(?range, "removing escape token");
            source.delete(range.clone());
            walker.delete(range);
            position = start;
            if walker.text()[start..].starts_with(escape) {
                position += escape.len();
            }
        }
    }

    let attributes = walker.tree().attribute_nodes();
    for id in &attributes {
        let directive = walker.directive(*id);
        let left = directive.range.start - directive.removed_left..directive.range.start;
        source.delete(left.clone());
        walker.delete(left);
    }
    for id in &attributes {
        let directive = walker.directive(*id);
        let right = directive.range.end..directive.range.end + directive.removed_right;
        source.delete(right.clone());
        walker.delete(right);
    }

    let (mut tree, text) = walker.into_parts();
    tree.collapse_attribute_containers();
    debug_assert_eq!(source.plain(), text);
    (source, tree)
}
