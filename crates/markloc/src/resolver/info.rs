//! Token tables: what to look for when parsing and what to put in its place
//! when resolving.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use bon::bon;

use super::context::ResolveContext;
use super::error::{ConfigError, ResolveWarning};
use super::{AttributeFn, IdentityFn, InputFn, OutputFn};
use crate::parser::{ParsedTemplate, TokenKind};
use crate::plurality::{PluralValue, Plurality, PluralityDefinition};
use crate::types::{SingleToken, Text, TripleToken};

/// The tokens a template is parsed with.
///
/// Tokens are scanned in a fixed order of kinds (ordered alternatives,
/// plural groups, input substitutions, output substitutions, attribute
/// spans) and, within a kind, in the order given here. Plural groups keep
/// their order because plurality overrides at the start of a template are
/// matched to them by position.
///
/// # Example
///
/// ```
/// use markloc::{ConfigError, ParsingInfo, SingleToken};
///
/// let info = ParsingInfo::builder()
///     .escape_token("~")
///     .input_substitutions(vec![SingleToken::new("|")])
///     .attributes(vec![SingleToken::new("|")])
///     .build();
/// assert!(matches!(info, Err(ConfigError::ConflictingDelimiter { .. })));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingInfo {
    escape_token: Option<String>,
    ordered: Vec<TripleToken>,
    plural_groups: Vec<TripleToken>,
    input_substitutions: Vec<SingleToken>,
    output_substitutions: Vec<SingleToken>,
    attributes: Vec<SingleToken>,
}

#[bon]
impl ParsingInfo {
    /// Checks the tables for ambiguities before accepting them. An empty
    /// escape token disables escaping.
    #[builder]
    pub fn new(
        #[builder(into)] escape_token: Option<String>,
        #[builder(default)] ordered: Vec<TripleToken>,
        #[builder(default)] plural_groups: Vec<TripleToken>,
        #[builder(default)] input_substitutions: Vec<SingleToken>,
        #[builder(default)] output_substitutions: Vec<SingleToken>,
        #[builder(default)] attributes: Vec<SingleToken>,
    ) -> Result<Self, ConfigError> {
        let info = Self {
            escape_token: escape_token.filter(|escape| !escape.is_empty()),
            ordered,
            plural_groups,
            input_substitutions,
            output_substitutions,
            attributes,
        };
        info.validate()?;
        Ok(info)
    }

    pub fn escape_token(&self) -> Option<&str> {
        self.escape_token.as_deref()
    }

    pub fn ordered(&self) -> &[TripleToken] {
        &self.ordered
    }

    pub fn plural_groups(&self) -> &[TripleToken] {
        &self.plural_groups
    }

    pub fn input_substitutions(&self) -> &[SingleToken] {
        &self.input_substitutions
    }

    pub fn output_substitutions(&self) -> &[SingleToken] {
        &self.output_substitutions
    }

    pub fn attributes(&self) -> &[SingleToken] {
        &self.attributes
    }

    /// Every configured token with its kind and its distinct delimiters.
    fn tokens(&self) -> Vec<(TokenKind, String, Vec<&str>)> {
        let mut tokens = Vec::new();
        tokens.extend(self.ordered.iter().map(|t| triple_entry(TokenKind::Ordered, t)));
        tokens.extend(self.plural_groups.iter().map(|t| triple_entry(TokenKind::Plural, t)));
        tokens.extend(
            self.input_substitutions
                .iter()
                .map(|t| single_entry(TokenKind::InputSubstitution, t)),
        );
        tokens.extend(
            self.output_substitutions
                .iter()
                .map(|t| single_entry(TokenKind::OutputSubstitution, t)),
        );
        tokens.extend(self.attributes.iter().map(|t| single_entry(TokenKind::Attribute, t)));
        tokens
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (index, token) in self.plural_groups.iter().enumerate() {
            if self.plural_groups[..index].contains(token) {
                return Err(ConfigError::DuplicatePluralGroup {
                    token: token.to_string(),
                });
            }
        }

        for token in self.ordered.iter().chain(&self.plural_groups) {
            if token.delimiters().iter().all(|d| !d.is_empty())
                && (token.interior() == token.left() || token.interior() == token.right())
            {
                return Err(ConfigError::AmbiguousInterior {
                    token: token.to_string(),
                });
            }
        }

        let mut owners: Vec<(&str, String)> = Vec::new();
        for (kind, label, delimiters) in self.tokens() {
            if delimiters.iter().any(|d| d.is_empty()) {
                return Err(ConfigError::EmptyDelimiter { kind, token: label });
            }
            let owner = format!("{kind} '{label}'");
            for delimiter in &delimiters {
                if let Some((_, first)) = owners.iter().find(|(claimed, _)| claimed == delimiter) {
                    return Err(ConfigError::ConflictingDelimiter {
                        delimiter: delimiter.to_string(),
                        first: first.clone(),
                        second: owner,
                    });
                }
            }
            let clashing_escape = self
                .escape_token()
                .filter(|escape| delimiters.iter().any(|d| d.contains(escape)));
            if let Some(escape) = clashing_escape {
                return Err(ConfigError::EscapeConflict {
                    escape: escape.to_string(),
                    token: label,
                });
            }
            owners.extend(delimiters.into_iter().map(|d| (d, owner.clone())));
        }
        Ok(())
    }
}

fn triple_entry(kind: TokenKind, token: &TripleToken) -> (TokenKind, String, Vec<&str>) {
    let mut delimiters = token.delimiters().to_vec();
    delimiters.dedup();
    if delimiters.len() == 3 && delimiters[0] == delimiters[2] {
        delimiters.pop();
    }
    (kind, token.to_string(), delimiters)
}

fn single_entry(kind: TokenKind, token: &SingleToken) -> (TokenKind, String, Vec<&str>) {
    (kind, token.to_string(), vec![token.token()])
}

/// Everything needed to resolve templates from `S` into `D`.
///
/// Input substitutions run first, on the source representation; the
/// result is then converted with the identity function and every other
/// directive is resolved on the output representation. Tokens without a
/// value here are reported and left in the output.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
///
/// use markloc::{ResolvingInfo, TripleToken, identity};
///
/// let info = ResolvingInfo::<String, String>::builder()
///     .ordered(BTreeMap::from([(TripleToken::new("<", ":", ">"), 1)]))
///     .identity(identity())
///     .build()
///     .unwrap();
/// assert_eq!(info.apply("the <first:second>"), "the second");
/// ```
#[derive(Clone)]
pub struct ResolvingInfo<S, D> {
    parsing: ParsingInfo,
    default_plurality: Arc<dyn Plurality>,
    input_substitutions: BTreeMap<SingleToken, InputFn<S>>,
    output_substitutions: BTreeMap<SingleToken, OutputFn<D>>,
    ordered: BTreeMap<TripleToken, i64>,
    plural_groups: Vec<(TripleToken, PluralValue)>,
    attributes: BTreeMap<SingleToken, AttributeFn<D>>,
    identity: IdentityFn<S, D>,
}

#[bon]
impl<S: Text, D: Text> ResolvingInfo<S, D> {
    /// Fails when the tokens cannot be parsed unambiguously, see
    /// [`ParsingInfo`].
    ///
    /// `ordered` gives the arm to keep for each ordered alternative and
    /// `plural_groups` the value driving each plural group, in override
    /// order. Plural groups without an override use `default_plurality`,
    /// which defaults to a definition matching nothing (always the last
    /// zone). `identity` converts the source representation into the output
    /// one and must not change its plain text.
    #[builder]
    pub fn new(
        #[builder(into)] escape_token: Option<String>,
        default_plurality: Option<Arc<dyn Plurality>>,
        #[builder(default)] input_substitutions: BTreeMap<SingleToken, InputFn<S>>,
        #[builder(default)] output_substitutions: BTreeMap<SingleToken, OutputFn<D>>,
        #[builder(default)] ordered: BTreeMap<TripleToken, i64>,
        #[builder(default)] plural_groups: Vec<(TripleToken, PluralValue)>,
        #[builder(default)] attributes: BTreeMap<SingleToken, AttributeFn<D>>,
        identity: IdentityFn<S, D>,
    ) -> Result<Self, ConfigError> {
        let parsing = ParsingInfo::builder()
            .maybe_escape_token(escape_token)
            .ordered(ordered.keys().cloned().collect())
            .plural_groups(plural_groups.iter().map(|(token, _)| token.clone()).collect())
            .input_substitutions(input_substitutions.keys().cloned().collect())
            .output_substitutions(output_substitutions.keys().cloned().collect())
            .attributes(attributes.keys().cloned().collect())
            .build()?;
        Ok(Self {
            parsing,
            default_plurality: default_plurality
                .unwrap_or_else(|| Arc::new(PluralityDefinition::matching_nothing())),
            input_substitutions,
            output_substitutions,
            ordered,
            plural_groups,
            attributes,
            identity,
        })
    }

    pub fn parsing_info(&self) -> &ParsingInfo {
        &self.parsing
    }

    /// Parses `source` with the tokens of this resolving info.
    pub fn parse(&self, source: impl Into<S>) -> ParsedTemplate<S> {
        ParsedTemplate::parse(source.into(), &self.parsing)
    }

    /// Parses and resolves `source`.
    pub fn apply(&self, source: impl Into<S>) -> D {
        self.parse(source).resolve(self)
    }

    /// Parses and resolves `source`, returning the resolve warnings.
    /// Parse warnings are available on [`ParsedTemplate::warnings`].
    pub fn apply_with_warnings(&self, source: impl Into<S>) -> (D, Vec<ResolveWarning>) {
        let mut context = ResolveContext::new();
        let output = self.parse(source).resolve_in(self, &mut context);
        (output, context.take_warnings())
    }

    pub fn default_plurality(&self) -> &dyn Plurality {
        self.default_plurality.as_ref()
    }

    pub fn input_substitution(&self, token: &SingleToken) -> Option<&InputFn<S>> {
        self.input_substitutions.get(token)
    }

    pub fn output_substitution(&self, token: &SingleToken) -> Option<&OutputFn<D>> {
        self.output_substitutions.get(token)
    }

    pub fn attribute(&self, token: &SingleToken) -> Option<&AttributeFn<D>> {
        self.attributes.get(token)
    }

    pub fn ordered_value(&self, token: &TripleToken) -> Option<i64> {
        self.ordered.get(token).copied()
    }

    pub fn plural_value(&self, token: &TripleToken) -> Option<&PluralValue> {
        self.plural_groups
            .iter()
            .find(|(group, _)| group == token)
            .map(|(_, value)| value)
    }

    pub fn identity(&self) -> &IdentityFn<S, D> {
        &self.identity
    }
}

impl<S, D> Debug for ResolvingInfo<S, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ResolvingInfo")
            .field("parsing", &self.parsing)
            .field("default_plurality", &self.default_plurality)
            .field("ordered", &self.ordered)
            .field("plural_groups", &self.plural_groups)
            .finish_non_exhaustive()
    }
}
