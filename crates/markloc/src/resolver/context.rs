//! Warning collection for one resolution.

use std::mem;

use tracing::warn;

use super::error::ResolveWarning;
use crate::parser::TokenKind;

/// State carried through one resolution: the warnings seen so far.
///
/// Each warning is kept once, however many directives raise it, so a
/// missing value for a three-arm alternative is reported a single time.
#[derive(Debug, Default)]
pub struct ResolveContext {
    warnings: Vec<ResolveWarning>,
}

impl ResolveContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning unless an equal one was already recorded.
    pub fn add_warning(&mut self, warning: ResolveWarning) {
        if !self.warnings.contains(&warning) {
            warn!(%warning, "template resolve warning");
            self.warnings.push(warning);
        }
    }

    pub(crate) fn missing_value(&mut self, kind: TokenKind, token: impl ToString) {
        self.add_warning(ResolveWarning::MissingValue {
            kind,
            token: token.to_string(),
        });
    }

    /// Get a reference to collected warnings.
    pub fn warnings(&self) -> &[ResolveWarning] {
        &self.warnings
    }

    /// Drains the collected warnings.
    pub fn take_warnings(&mut self) -> Vec<ResolveWarning> {
        mem::take(&mut self.warnings)
    }
}
