//! The common token group.
//!
//! - `~`: escape
//! - `|…|`: simple replacement 1
//! - `^…^`: simple replacement 2
//! - `#…#`: number
//! - `<…:…>`: plural group driven by the number
//! - `{…₋…}`: gender of "me", male arm first
//! - `` `…¦…´ ``: gender of the other person, male arm first
//! - `*…*`, `_…_`: bold and italic, styled output only
//!
//! Only the tokens given a value are parsed. With plain output, `*` and `_`
//! are never tokens, so escape them in templates shared by both outputs.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use bon::Builder;

use crate::config::Config;
use crate::plurality::PluralValue;
use crate::resolver::{
    AttributeFn, ConfigError, OutputFn, ParsingInfo, ResolvingInfo, constant, identity,
    styled_identity,
};
use crate::types::{SingleToken, StyledText, TripleToken};

/// Every token of the group except the escape token.
pub const TOKENS: [&str; 14] = [
    "|", "^", "#", "<", ":", ">", "{", "₋", "}", "`", "¦", "´", "*", "_",
];

/// A number shown by `#…#` and driving `<…:…>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    value: PluralValue,
    formatted: String,
}

impl Number {
    /// A number shown as `formatted`.
    pub fn new(value: impl Into<PluralValue>, formatted: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            formatted: formatted.into(),
        }
    }

    pub fn int(value: i64) -> Self {
        Self::new(value, value.to_string())
    }

    pub fn float(value: f64) -> Self {
        Self::new(value, value.to_string())
    }

    pub fn value(&self) -> PluralValue {
        self.value
    }

    pub fn formatted(&self) -> &str {
        &self.formatted
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.formatted)
    }
}

/// Values for the common token group.
///
/// # Example
///
/// ```
/// use markloc::{CommonTokens, Number};
///
/// let tokens = CommonTokens::builder()
///     .simple_replacement_1("Alice")
///     .number(Number::int(3))
///     .gender_other_is_male(false)
///     .build();
/// let info = tokens.str_to_str().unwrap();
/// assert_eq!(
///     info.apply("|name| sent `him¦her´ #n# <message:messages>"),
///     "Alice sent her 3 messages",
/// );
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct CommonTokens {
    /// Replaces `|…|`.
    #[builder(into)]
    simple_replacement_1: Option<String>,
    /// Replaces `^…^`.
    #[builder(into)]
    simple_replacement_2: Option<String>,
    /// Replaces `#…#` and drives `<…:…>`.
    number: Option<Number>,
    /// Picks the arm of `{…₋…}`.
    gender_me_is_male: Option<bool>,
    /// Picks the arm of `` `…¦…´ ``.
    gender_other_is_male: Option<bool>,
    #[builder(default)]
    config: Config,
}

impl CommonTokens {
    /// Resolving info for plain text output. Replacements are computed on
    /// the output side; bold and italic are not tokens.
    pub fn str_to_str(&self) -> Result<ResolvingInfo<String, String>, ConfigError> {
        let output_substitutions: BTreeMap<SingleToken, OutputFn<String>> =
            self.replacements().collect();
        ResolvingInfo::builder()
            .escape_token(self.config.escape_token())
            .default_plurality(self.config.default_plurality().clone())
            .ordered(self.ordered())
            .plural_groups(self.plural_groups())
            .output_substitutions(output_substitutions)
            .identity(identity())
            .build()
    }

    /// Resolving info for styled output. Replacements are plain strings, so
    /// they are applied before the text gets its base attributes.
    pub fn str_to_styled(&self) -> Result<ResolvingInfo<String, StyledText>, ConfigError> {
        let mut attributes: BTreeMap<SingleToken, AttributeFn<StyledText>> = BTreeMap::new();
        if !self.config.bold().changes().is_empty() {
            attributes.insert(SingleToken::new("*"), self.config.bold().clone().into_handler());
        }
        if !self.config.italic().changes().is_empty() {
            attributes.insert(SingleToken::new("_"), self.config.italic().clone().into_handler());
        }
        ResolvingInfo::builder()
            .escape_token(self.config.escape_token())
            .default_plurality(self.config.default_plurality().clone())
            .ordered(self.ordered())
            .plural_groups(self.plural_groups())
            .input_substitutions(self.replacements().collect())
            .attributes(attributes)
            .identity(styled_identity(self.config.base_attributes().clone()))
            .build()
    }

    /// Resolves `source` into plain text.
    pub fn apply(&self, source: &str) -> Result<String, ConfigError> {
        Ok(self.str_to_str()?.apply(source))
    }

    /// Resolves `source` into styled text.
    pub fn apply_styled(&self, source: &str) -> Result<StyledText, ConfigError> {
        Ok(self.str_to_styled()?.apply(source))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parsing info recognising every common token, values or not. Useful
    /// to inspect or lint templates.
    pub fn parsing_info(config: &Config) -> Result<ParsingInfo, ConfigError> {
        ParsingInfo::builder()
            .escape_token(config.escape_token())
            .ordered(vec![gender_me(), gender_other()])
            .plural_groups(vec![number_plural()])
            .output_substitutions(["|", "^", "#"].into_iter().map(SingleToken::new).collect())
            .attributes(["*", "_"].into_iter().map(SingleToken::new).collect())
            .build()
    }

    fn replacements(&self) -> impl Iterator<Item = (SingleToken, OutputFn<String>)> {
        [
            ("|", self.simple_replacement_1.clone()),
            ("^", self.simple_replacement_2.clone()),
            ("#", self.number.as_ref().map(|n| n.formatted().to_string())),
        ]
        .into_iter()
        .filter_map(|(token, value)| value.map(|value| (SingleToken::new(token), constant(value))))
    }

    fn ordered(&self) -> BTreeMap<TripleToken, i64> {
        [
            (gender_me(), self.gender_me_is_male),
            (gender_other(), self.gender_other_is_male),
        ]
        .into_iter()
        .filter_map(|(token, male)| male.map(|male| (token, if male { 0 } else { 1 })))
        .collect()
    }

    fn plural_groups(&self) -> Vec<(TripleToken, PluralValue)> {
        self.number
            .iter()
            .map(|number| (number_plural(), number.value()))
            .collect()
    }
}

fn gender_me() -> TripleToken {
    TripleToken::new("{", "₋", "}")
}

fn gender_other() -> TripleToken {
    TripleToken::new("`", "¦", "´")
}

fn number_plural() -> TripleToken {
    TripleToken::new("<", ":", ">")
}

/// Escapes every common token, and the escape token itself, in `text`.
///
/// # Example
///
/// ```
/// use markloc::tokens::escape;
///
/// assert_eq!(escape("a|b~c", "~"), "a~|b~~c");
/// ```
pub fn escape(text: &str, escape_token: &str) -> String {
    if escape_token.is_empty() {
        return text.to_string();
    }
    let escaped = text.replace(escape_token, &format!("{escape_token}{escape_token}"));
    TOKENS.iter().fold(escaped, |text, token| {
        text.replace(*token, &format!("{escape_token}{token}"))
    })
}
