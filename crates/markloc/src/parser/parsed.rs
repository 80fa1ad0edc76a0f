use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::error::ParseWarning;
use super::extract::{extract, plurality_prefix};
use super::tree::DirectiveTree;
use super::untokenize::untokenize;
use crate::plurality::PluralityDefinition;
use crate::resolver::{self, ParsingInfo, ResolveContext, ResolveWarning, ResolvingInfo};
use crate::types::{Text, TripleToken};

/// A template parsed once and resolvable many times.
///
/// Holds the untokenized source (escapes and attribute delimiters removed),
/// the directive tree over it, and the plurality overrides read from the
/// start of the template. None of these change after parsing.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
///
/// use markloc::{ParsedTemplate, ResolvingInfo, TripleToken, identity};
///
/// let token = TripleToken::new("<", ":", ">");
/// let info = |arm| {
///     ResolvingInfo::<String, String>::builder()
///         .ordered(BTreeMap::from([(token.clone(), arm)]))
///         .identity(identity())
///         .build()
///         .unwrap()
/// };
///
/// let template = ParsedTemplate::parse("the <first:second>".to_string(), info(0).parsing_info());
/// assert_eq!(template.resolve(&info(0)), "the first");
/// assert_eq!(template.resolve(&info(1)), "the second");
/// ```
#[derive(Debug, Clone)]
pub struct ParsedTemplate<S> {
    untokenized: S,
    tree: DirectiveTree,
    plurality_overrides: BTreeMap<TripleToken, PluralityDefinition>,
    warnings: Vec<ParseWarning>,
}

impl<S: Text> ParsedTemplate<S> {
    /// Parses `source`. Never fails: problems are recorded as warnings and
    /// the markup involved is kept as literal text.
    pub fn parse(source: S, info: &ParsingInfo) -> Self {
        let mut source = source;
        let prefix = plurality_prefix(source.plain());
        if prefix.stripped > 0 {
            source.delete(0..prefix.stripped);
        }

        let (tree, extraction_warnings) = extract(source.plain(), info);
        let (untokenized, tree) = untokenize(source, tree, info.escape_token());

        let plurality_overrides = info
            .plural_groups()
            .iter()
            .zip(prefix.definitions)
            .filter_map(|(token, definition)| definition.map(|d| (token.clone(), d)))
            .collect();

        let mut warnings = prefix.warnings;
        warnings.extend(
            extraction_warnings
                .into_iter()
                .map(|warning| warning.shifted(prefix.stripped)),
        );
        for warning in &warnings {
            warn!(%warning, "template parse warning");
        }
        debug!(
            directives = tree.len(),
            warnings = warnings.len(),
            "parsed template"
        );

        Self {
            untokenized,
            tree,
            plurality_overrides,
            warnings,
        }
    }

    /// Resolves this template. Warnings are logged and dropped.
    pub fn resolve<D: Text>(&self, info: &ResolvingInfo<S, D>) -> D {
        self.resolve_in(info, &mut ResolveContext::new())
    }

    /// Resolves this template, also returning what could not be resolved.
    pub fn resolve_with_warnings<D: Text>(
        &self,
        info: &ResolvingInfo<S, D>,
    ) -> (D, Vec<ResolveWarning>) {
        let mut context = ResolveContext::new();
        let output = self.resolve_in(info, &mut context);
        (output, context.take_warnings())
    }

    /// Resolves this template, recording warnings in `context`.
    pub fn resolve_in<D: Text>(
        &self,
        info: &ResolvingInfo<S, D>,
        context: &mut ResolveContext,
    ) -> D {
        resolver::resolve(self, info, context)
    }

    /// The source with escapes and attribute delimiters removed.
    pub fn untokenized(&self) -> &S {
        &self.untokenized
    }

    pub fn tree(&self) -> &DirectiveTree {
        &self.tree
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// The plurality definition given for `token` at the start of the
    /// template, if any.
    pub fn plurality_override(&self, token: &TripleToken) -> Option<&PluralityDefinition> {
        self.plurality_overrides.get(token)
    }
}
