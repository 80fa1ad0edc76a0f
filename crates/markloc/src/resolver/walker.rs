//! Traversal of a directive tree while its text is being edited.
//!
//! The walker owns a private copy of the tree and of the plain text. It
//! visits nodes children first, then the node itself. Each edit made to the
//! text is mirrored here through [`Walker::replace`], which relocates the
//! bounds of every remaining directive. Deleting a group while it is being
//! visited is safe: stack frames of removed nodes are skipped when popped.

use std::ops::Range;

use tracing::trace;

use crate::parser::{Directive, DirectiveTree, NodeId};

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    expanded: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct Walker {
    tree: DirectiveTree,
    text: String,
    stack: Vec<Frame>,
}

impl Walker {
    pub(crate) fn new(tree: DirectiveTree, text: String) -> Self {
        let mut walker = Self {
            tree,
            text,
            stack: Vec::new(),
        };
        walker.reset();
        walker
    }

    /// Restarts the traversal from the first root.
    pub(crate) fn reset(&mut self) {
        self.stack = self
            .tree
            .roots()
            .iter()
            .rev()
            .map(|node| Frame {
                node: *node,
                expanded: false,
            })
            .collect();
    }

    /// Returns the next node whose children have all been visited.
    pub(crate) fn next_node(&mut self) -> Option<NodeId> {
        while let Some(frame) = self.stack.pop() {
            let Some(directive) = self.tree.get(frame.node) else {
                continue;
            };
            if frame.expanded {
                return Some(frame.node);
            }
            let children: Vec<Frame> = directive
                .children()
                .iter()
                .rev()
                .map(|child| Frame {
                    node: *child,
                    expanded: false,
                })
                .collect();
            self.stack.push(Frame {
                node: frame.node,
                expanded: true,
            });
            self.stack.extend(children);
        }
        None
    }

    pub(crate) fn directive(&self, id: NodeId) -> &Directive {
        &self.tree[id]
    }

    pub(crate) fn tree(&self) -> &DirectiveTree {
        &self.tree
    }

    /// The plain text as it stands after every edit so far.
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn into_parts(self) -> (DirectiveTree, String) {
        (self.tree, self.text)
    }

    pub(crate) fn delete_group(&mut self, group_id: usize) {
        trace!(group_id, "removing directive group");
        self.tree.remove_group(group_id);
    }

    /// Replaces `edit` with `inserted` and relocates every remaining range.
    pub(crate) fn replace(&mut self, edit: Range<usize>, inserted: &str) {
        trace!(?edit, inserted, "editing text");
        let old = self.text.clone();
        self.text.replace_range(edit.clone(), inserted);
        let new = &self.text;
        self.tree
            .remap(|bound| relocate(bound, &edit, inserted.len(), &old, new));
    }

    pub(crate) fn delete(&mut self, edit: Range<usize>) {
        self.replace(edit, "");
    }
}

/// Finds where `bound`, an offset into `old`, lands in `new` after `edit`
/// was replaced by `inserted_len` bytes.
///
/// Bounds at or after the end of the edit are found again by matching the
/// untouched text between the edit and the bound, anchored right after the
/// inserted text. Bounds inside the edit are clamped into the inserted text.
fn relocate(bound: usize, edit: &Range<usize>, inserted_len: usize, old: &str, new: &str) -> usize {
    if bound <= edit.start && bound < edit.end {
        return bound;
    }
    if bound >= edit.end {
        let anchor = edit.start + inserted_len;
        let fragment = &old[edit.end..bound];
        if new.get(anchor..).is_some_and(|rest| rest.starts_with(fragment)) {
            return anchor + fragment.len();
        }
        trace!(bound, ?edit, "fragment not found after edit, shifting");
        return (bound + inserted_len).saturating_sub(edit.len()).min(new.len());
    }
    let mut clamped = edit.start + (bound - edit.start).min(inserted_len);
    while !new.is_char_boundary(clamped) {
        clamped -= 1;
    }
    clamped
}
