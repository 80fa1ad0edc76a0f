//! Output formatting for CLI commands.

pub mod diagnostic;
pub mod table;

pub use diagnostic::TemplateDiagnostic;

use markloc::{Attributes, StyledText};
use owo_colors::{OwoColorize, Stream, Style};
use serde::Serialize;

/// One attribute run of a styled result, for JSON output.
#[derive(Debug, Serialize)]
pub struct RunJson {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub attributes: Attributes,
}

pub fn styled_runs(styled: &StyledText) -> Vec<RunJson> {
    styled
        .runs()
        .map(|(range, attributes)| RunJson {
            start: range.start,
            end: range.end,
            text: styled.as_str()[range].to_string(),
            attributes: attributes.clone(),
        })
        .collect()
}

/// Renders styled text with terminal escapes. Fonts, links and custom
/// attributes have no terminal equivalent and are dropped.
pub fn render_styled(styled: &StyledText) -> String {
    styled
        .runs()
        .map(|(range, attributes)| {
            let style = terminal_style(attributes);
            let text = &styled.as_str()[range];
            text.if_supports_color(Stream::Stdout, |text| text.style(style))
                .to_string()
        })
        .collect()
}

fn terminal_style(attributes: &Attributes) -> Style {
    let mut style = Style::new();
    if attributes.bold {
        style = style.bold();
    }
    if attributes.italic {
        style = style.italic();
    }
    if attributes.underline {
        style = style.underline();
    }
    if let Some(color) = attributes.foreground {
        style = style.truecolor(color.red, color.green, color.blue);
    }
    if let Some(color) = attributes.background {
        style = style.on_truecolor(color.red, color.green, color.blue);
    }
    style
}

/// Prints warnings to stderr, one per line.
pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!(
            "{} {warning}",
            "warning:".if_supports_color(Stream::Stderr, |text| text.yellow())
        );
    }
}
