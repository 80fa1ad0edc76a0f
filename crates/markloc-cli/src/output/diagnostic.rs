//! Miette diagnostic wrapper for template parse warnings.

use std::ops::Range;
use std::path::Path;

use markloc::ParseWarning;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for one parse warning in a template file.
///
/// Fields are read by the miette derive macros.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(markloc::parse), severity(Warning))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: Option<SourceSpan>,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Builds a diagnostic for `warning`, found in the template starting at
    /// byte `line_start` of `content`.
    pub fn from_parse_warning(
        path: &Path,
        content: &str,
        line_start: usize,
        warning: &ParseWarning,
    ) -> Self {
        let span = warning.span().map(|span| clamp(span, line_start, content.len()));
        TemplateDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span,
            message: warning.to_string(),
            help: help(warning),
        }
    }
}

/// Keeps the span inside the file so miette never reads out of bounds.
fn clamp(span: Range<usize>, line_start: usize, len: usize) -> SourceSpan {
    let start = (line_start + span.start).min(len);
    let end = (line_start + span.end).clamp(start, len);
    (start, (end - start).max(1).min(len - start)).into()
}

fn help(warning: &ParseWarning) -> Option<String> {
    let help = match warning {
        ParseWarning::UnmatchedDelimiter { opening, .. } => {
            format!("escape '{opening}' to keep it as text")
        }
        ParseWarning::UnterminatedPluralityOverride => {
            "close the block with '||', or start the line with '|||' for a literal '||'".into()
        }
        ParseWarning::InvalidPluralityDefinition { .. } => {
            "use '_' to keep the default plurality for this group".into()
        }
        ParseWarning::InvalidOverlap { .. } => {
            "directives must nest fully inside one another; escape one of them".into()
        }
    };
    Some(help)
}
