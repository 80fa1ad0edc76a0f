//! The directive forest.
//!
//! Directives live in an arena and refer to their children by [`NodeId`].
//! A node whose container lies inside the content range of another
//! (non-attribute) node is its child. Attribute spans never have children
//! but may overlap each other freely.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::{Index, Range};

use serde::Serialize;

use crate::types::{SingleToken, TripleToken};

/// Stable identifier of a node in a [`DirectiveTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(usize);

/// The category of a token, used in diagnostics and tree dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TokenKind {
    InputSubstitution,
    OutputSubstitution,
    Ordered,
    Plural,
    Attribute,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            TokenKind::InputSubstitution => "input substitution",
            TokenKind::OutputSubstitution => "output substitution",
            TokenKind::Ordered => "ordered alternative",
            TokenKind::Plural => "plural group",
            TokenKind::Attribute => "attribute span",
        };
        write!(f, "{name}")
    }
}

/// What a directive does when resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DirectiveKind {
    /// Replaced by a value computed in the source representation.
    InputSubstitution(SingleToken),
    /// Replaced by a value computed in the output representation.
    OutputSubstitution(SingleToken),
    /// One arm of an ordered alternative.
    Ordered {
        token: TripleToken,
        arm: usize,
        arms: usize,
    },
    /// One zone of a plural group.
    PluralZone {
        token: TripleToken,
        zone: usize,
        zones: usize,
    },
    /// Applies attributes over its content without changing its length.
    Attribute(SingleToken),
}

impl DirectiveKind {
    pub fn token_kind(&self) -> TokenKind {
        match self {
            DirectiveKind::InputSubstitution(_) => TokenKind::InputSubstitution,
            DirectiveKind::OutputSubstitution(_) => TokenKind::OutputSubstitution,
            DirectiveKind::Ordered { .. } => TokenKind::Ordered,
            DirectiveKind::PluralZone { .. } => TokenKind::Plural,
            DirectiveKind::Attribute(_) => TokenKind::Attribute,
        }
    }

    /// The token this directive was matched from, as displayed to users.
    pub fn token_label(&self) -> String {
        match self {
            DirectiveKind::InputSubstitution(token)
            | DirectiveKind::OutputSubstitution(token)
            | DirectiveKind::Attribute(token) => token.to_string(),
            DirectiveKind::Ordered { token, .. } | DirectiveKind::PluralZone { token, .. } => {
                token.to_string()
            }
        }
    }
}

/// One parsed directive: a single arm of a token occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    /// Shared by every arm of the same occurrence.
    pub group_id: usize,
    pub kind: DirectiveKind,
    /// The content this arm covers, delimiters excluded.
    pub range: Range<usize>,
    /// The whole occurrence, delimiters included.
    pub container: Range<usize>,
    /// Length of the opening delimiter stripped before resolution.
    pub removed_left: usize,
    /// Length of the closing delimiter stripped before resolution.
    pub removed_right: usize,
    children: Vec<NodeId>,
    #[serde(skip)]
    live: bool,
}

impl Directive {
    pub fn new(
        group_id: usize,
        kind: DirectiveKind,
        range: Range<usize>,
        container: Range<usize>,
    ) -> Self {
        let (removed_left, removed_right) = match &kind {
            DirectiveKind::Attribute(token) => (token.left().len(), token.right().len()),
            _ => (0, 0),
        };
        Self {
            group_id,
            kind,
            range,
            container,
            removed_left,
            removed_right,
            children: Vec::new(),
            live: true,
        }
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self.kind, DirectiveKind::Attribute(_))
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Attribute spans sort after their siblings so they are applied once
    /// the text they cover is final.
    fn sort_key(&self) -> (bool, usize, usize, usize) {
        (self.is_attribute(), self.container.start, self.group_id, self.range.start)
    }
}

/// A directive group could not be placed without a partial overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InvalidOverlap;

/// The forest of directives of one template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveTree {
    nodes: Vec<Directive>,
    roots: Vec<NodeId>,
}

impl DirectiveTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&Directive> {
        self.nodes.get(id.0).filter(|node| node.live)
    }

    /// Number of directives still in the tree.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|node| node.live).count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Visits every directive depth first, parents before children, with
    /// its depth.
    pub fn pre_order(&self) -> Vec<(usize, NodeId)> {
        let mut out = Vec::new();
        let mut stack: Vec<(usize, NodeId)> = self.roots.iter().rev().map(|id| (0, *id)).collect();
        while let Some((depth, id)) = stack.pop() {
            out.push((depth, id));
            stack.extend(self.nodes[id.0].children.iter().rev().map(|child| (depth + 1, *child)));
        }
        out
    }

    /// Adds every arm of one occurrence, or none of them.
    pub(crate) fn insert_group(&mut self, arms: Vec<Directive>) -> Result<(), InvalidOverlap> {
        let snapshot = self.clone();
        for arm in arms {
            let id = NodeId(self.nodes.len());
            self.nodes.push(arm);
            if let Err(error) = self.insert_at(None, id) {
                *self = snapshot;
                return Err(error);
            }
        }
        Ok(())
    }

    fn insert_at(&mut self, parent: Option<NodeId>, id: NodeId) -> Result<(), InvalidOverlap> {
        let siblings = self.child_list(parent).clone();
        for sibling in siblings {
            let candidate = &self.nodes[id.0];
            let existing = &self.nodes[sibling.0];
            if candidate.container == existing.container {
                // Another arm of the same occurrence.
                continue;
            }
            if (candidate.is_attribute() && existing.is_attribute())
                || !overlaps(&candidate.range, &existing.range)
            {
                continue;
            }
            if !existing.is_attribute() && contains(&existing.range, &candidate.container) {
                return self.insert_at(Some(sibling), id);
            }
            if contains(&candidate.range, &existing.container) {
                if candidate.is_attribute() {
                    // Sterile: the existing directive stays where it is.
                    continue;
                }
                self.child_list_mut(parent).retain(|child| *child != sibling);
                self.insert_at(Some(id), sibling)?;
                continue;
            }
            return Err(InvalidOverlap);
        }
        self.attach(parent, id);
        Ok(())
    }

    fn attach(&mut self, parent: Option<NodeId>, id: NodeId) {
        let key = self.nodes[id.0].sort_key();
        let position = self
            .child_list(parent)
            .iter()
            .position(|other| self.nodes[other.0].sort_key() > key);
        let list = self.child_list_mut(parent);
        match position {
            Some(position) => list.insert(position, id),
            None => list.push(id),
        }
    }

    fn child_list(&self, parent: Option<NodeId>) -> &Vec<NodeId> {
        match parent {
            Some(parent) => &self.nodes[parent.0].children,
            None => &self.roots,
        }
    }

    fn child_list_mut(&mut self, parent: Option<NodeId>) -> &mut Vec<NodeId> {
        match parent {
            Some(parent) => &mut self.nodes[parent.0].children,
            None => &mut self.roots,
        }
    }

    /// Removes every directive of a group, with their subtrees.
    pub(crate) fn remove_group(&mut self, group_id: usize) {
        let doomed: Vec<NodeId> = (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| self.nodes[id.0].live && self.nodes[id.0].group_id == group_id)
            .collect();
        if doomed.is_empty() {
            return;
        }
        self.roots.retain(|id| !doomed.contains(id));
        for node in &mut self.nodes {
            node.children.retain(|id| !doomed.contains(id));
        }
        let mut pending = doomed;
        while let Some(id) = pending.pop() {
            let node = &mut self.nodes[id.0];
            node.live = false;
            pending.extend(node.children.drain(..));
        }
    }

    /// Maps every bound of every remaining directive through `relocate`.
    pub(crate) fn remap(&mut self, mut relocate: impl FnMut(usize) -> usize) {
        for node in self.nodes.iter_mut().filter(|node| node.live) {
            node.range = relocate(node.range.start)..relocate(node.range.end);
            node.container = relocate(node.container.start)..relocate(node.container.end);
        }
    }

    /// Drops the recorded delimiters of attribute spans once they have been
    /// removed from the text: their container becomes their content.
    pub(crate) fn collapse_attribute_containers(&mut self) {
        for node in self.nodes.iter_mut().filter(|node| node.live && node.is_attribute()) {
            node.container = node.range.clone();
        }
    }

    /// Live attribute spans, in arena order.
    pub(crate) fn attribute_nodes(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| self.nodes[id.0].live && self.nodes[id.0].is_attribute())
            .collect()
    }
}

impl Index<NodeId> for DirectiveTree {
    type Output = Directive;

    fn index(&self, id: NodeId) -> &Directive {
        &self.nodes[id.0]
    }
}

fn contains(outer: &Range<usize>, inner: &Range<usize>) -> bool {
    outer.start <= inner.start && inner.end <= outer.end
}

/// Strict overlap for two non-empty ranges; touching counts when one of
/// them is empty.
fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    if a.is_empty() || b.is_empty() {
        a.start <= b.end && b.start <= a.end
    } else {
        a.start < b.end && b.start < a.end
    }
}
