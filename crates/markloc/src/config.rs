//! Defaults shared by token groups.

use std::sync::Arc;

use bon::Builder;

use crate::plurality::{Plurality, PluralityDefinition};
use crate::types::{AttributeChange, Attributes, AttributesChanges};

/// Explicit defaults for building resolving infos.
///
/// Nothing here is global: build a `Config` and hand it to the token group
/// that needs it.
///
/// # Example
///
/// ```
/// use markloc::{AttributesChanges, Config};
///
/// let config = Config::builder().escape_token("\\").italic(AttributesChanges::default()).build();
/// assert_eq!(config.escape_token(), "\\");
/// assert!(config.italic().changes().is_empty());
/// assert!(!config.bold().changes().is_empty());
/// ```
#[derive(Debug, Clone, Builder)]
pub struct Config {
    /// Empty to disable escaping.
    #[builder(default = "~".to_string(), into)]
    escape_token: String,
    /// Used by plural groups without an override.
    #[builder(default = matching_nothing())]
    default_plurality: Arc<dyn Plurality>,
    /// Attributes of the whole text when resolving into styled text.
    #[builder(default)]
    base_attributes: Attributes,
    /// Applied by `*…*` spans. Empty changes disable the token.
    #[builder(default = AttributesChanges::single(AttributeChange::SetBold))]
    bold: AttributesChanges,
    /// Applied by `_…_` spans. Empty changes disable the token.
    #[builder(default = AttributesChanges::single(AttributeChange::SetItalic))]
    italic: AttributesChanges,
}

impl Config {
    pub fn escape_token(&self) -> &str {
        &self.escape_token
    }

    pub fn default_plurality(&self) -> &Arc<dyn Plurality> {
        &self.default_plurality
    }

    pub fn base_attributes(&self) -> &Attributes {
        &self.base_attributes
    }

    pub fn bold(&self) -> &AttributesChanges {
        &self.bold
    }

    pub fn italic(&self) -> &AttributesChanges {
        &self.italic
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

fn matching_nothing() -> Arc<dyn Plurality> {
    Arc::new(PluralityDefinition::matching_nothing())
}
