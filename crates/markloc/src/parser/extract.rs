//! Directive discovery.
//!
//! Each token kind is scanned over the whole text in a fixed order: ordered
//! alternatives, plural groups, input substitutions, output substitutions,
//! then attribute spans. Every occurrence gets a fresh group id and is
//! inserted into the tree as a unit.

use std::iter;
use std::ops::Range;

use super::error::ParseWarning;
use super::scanner::{find_pair, find_unescaped};
use super::tree::{Directive, DirectiveKind, DirectiveTree};
use crate::plurality::PluralityDefinition;
use crate::resolver::ParsingInfo;
use crate::types::{SingleToken, TripleToken};

const OVERRIDE_SEPARATOR: &str = "||";

/// The plurality overrides found at the start of a template.
#[derive(Debug, Default)]
pub(crate) struct PluralityPrefix {
    /// Bytes to remove from the start of the text.
    pub(crate) stripped: usize,
    /// One entry per plural group, positionally; `None` keeps the default.
    pub(crate) definitions: Vec<Option<PluralityDefinition>>,
    pub(crate) warnings: Vec<ParseWarning>,
}

/// Reads a leading `||def|def|…||` block.
///
/// `_` stands for the default plurality. A text starting with `|||` has no
/// block; one bar is stripped so the rest reads as written.
pub(crate) fn plurality_prefix(text: &str) -> PluralityPrefix {
    if !text.starts_with(OVERRIDE_SEPARATOR) {
        return PluralityPrefix::default();
    }
    if text.starts_with("|||") {
        return PluralityPrefix {
            stripped: 1,
            ..PluralityPrefix::default()
        };
    }
    let body = &text[OVERRIDE_SEPARATOR.len()..];
    let Some(end) = body.find(OVERRIDE_SEPARATOR) else {
        return PluralityPrefix {
            warnings: vec![ParseWarning::UnterminatedPluralityOverride],
            ..PluralityPrefix::default()
        };
    };

    let mut warnings = Vec::new();
    let definitions = body[..end]
        .split('|')
        .enumerate()
        .map(|(index, definition)| {
            if definition == "_" {
                return None;
            }
            definition
                .parse::<PluralityDefinition>()
                .map_err(|error| {
                    warnings.push(ParseWarning::InvalidPluralityDefinition {
                        index,
                        definition: definition.to_string(),
                        error,
                    });
                })
                .ok()
        })
        .collect();
    PluralityPrefix {
        stripped: OVERRIDE_SEPARATOR.len() * 2 + end,
        definitions,
        warnings,
    }
}

/// Scans `text` for every configured token and builds the directive tree.
pub(crate) fn extract(text: &str, info: &ParsingInfo) -> (DirectiveTree, Vec<ParseWarning>) {
    let mut extractor = Extractor {
        text,
        escape: info.escape_token(),
        tree: DirectiveTree::new(),
        warnings: Vec::new(),
        next_group: 0,
    };
    for token in info.ordered() {
        extractor.multi_arm(token, |arm, arms| DirectiveKind::Ordered {
            token: token.clone(),
            arm,
            arms,
        });
    }
    for token in info.plural_groups() {
        extractor.multi_arm(token, |zone, zones| DirectiveKind::PluralZone {
            token: token.clone(),
            zone,
            zones,
        });
    }
    for token in info.input_substitutions() {
        extractor.single(token, || DirectiveKind::InputSubstitution(token.clone()));
    }
    for token in info.output_substitutions() {
        extractor.single(token, || DirectiveKind::OutputSubstitution(token.clone()));
    }
    for token in info.attributes() {
        extractor.single(token, || DirectiveKind::Attribute(token.clone()));
    }
    (extractor.tree, extractor.warnings)
}

struct Extractor<'a> {
    text: &'a str,
    escape: Option<&'a str>,
    tree: DirectiveTree,
    warnings: Vec<ParseWarning>,
    next_group: usize,
}

impl Extractor<'_> {
    fn single(&mut self, token: &SingleToken, kind: impl Fn() -> DirectiveKind) {
        let mut from = 0;
        while let Some(container) =
            self.next_occurrence(&token.to_string(), token.left(), token.right(), from)
        {
            from = container.end;
            let content = container.start + token.left().len()..container.end - token.right().len();
            let group = self.new_group();
            let directive = Directive::new(group, kind(), content, container.clone());
            self.insert(token.to_string(), container, vec![directive]);
        }
    }

    /// Arms are counted before any directive is built, so each arm knows
    /// the final count.
    fn multi_arm(&mut self, token: &TripleToken, kind: impl Fn(usize, usize) -> DirectiveKind) {
        let mut from = 0;
        while let Some(container) =
            self.next_occurrence(&token.to_string(), token.left(), token.right(), from)
        {
            from = container.end;
            let content = container.start + token.left().len()..container.end - token.right().len();

            let mut separators: Vec<Range<usize>> = Vec::new();
            let mut position = content.start;
            while let Some(separator) =
                find_unescaped(self.text, token.interior(), self.escape, position)
                    .filter(|separator| separator.end <= content.end)
            {
                position = separator.end;
                separators.push(separator);
            }

            let arms = separators.len() + 1;
            let starts = iter::once(content.start).chain(separators.iter().map(|s| s.end));
            let ends = separators.iter().map(|s| s.start).chain(iter::once(content.end));
            let group = self.new_group();
            let directives = starts
                .zip(ends)
                .enumerate()
                .map(|(arm, (start, end))| {
                    Directive::new(group, kind(arm, arms), start..end, container.clone())
                })
                .collect();
            self.insert(token.to_string(), container, directives);
        }
    }

    fn next_occurrence(
        &mut self,
        label: &str,
        left: &str,
        right: &str,
        from: usize,
    ) -> Option<Range<usize>> {
        let (open, close) = find_pair(self.text, left, right, self.escape, from)?;
        match close {
            Some(close) => Some(open.start..close.end),
            None => {
                self.warnings.push(ParseWarning::UnmatchedDelimiter {
                    token: label.to_string(),
                    opening: left.to_string(),
                    closing: right.to_string(),
                    offset: open.start,
                });
                None
            }
        }
    }

    fn new_group(&mut self) -> usize {
        let group = self.next_group;
        self.next_group += 1;
        group
    }

    fn insert(&mut self, label: String, container: Range<usize>, directives: Vec<Directive>) {
        if self.tree.insert_group(directives).is_err() {
            self.warnings.push(ParseWarning::InvalidOverlap {
                token: label,
                container,
            });
        }
    }
}
