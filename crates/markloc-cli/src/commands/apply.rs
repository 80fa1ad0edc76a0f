//! Implementation of the `markloc apply` command.

use std::sync::Arc;

use clap::{Args, ValueEnum};
use markloc::{
    CldrPlurality, CommonTokens, Config, Number, ParseWarning, Plurality, PluralityDefinition,
    ResolveWarning, ResolvingInfo, Text,
};
use miette::{IntoDiagnostic, Result, miette};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;

use crate::output::{RunJson, print_warnings, render_styled, styled_runs};

/// Arguments for the apply command.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Template to resolve
    pub template: String,

    /// Value of `|…|`
    #[arg(long)]
    pub r1: Option<String>,

    /// Value of `^…^`
    #[arg(long)]
    pub r2: Option<String>,

    /// Value of `#…#`, also driving `<…:…>`
    #[arg(long, value_parser = parse_number, allow_negative_numbers = true)]
    pub number: Option<Number>,

    /// Gender of "me" for `{…₋…}`
    #[arg(long, value_enum)]
    pub gender_me: Option<Gender>,

    /// Gender of the other person for `` `…¦…´ ``
    #[arg(long, value_enum)]
    pub gender_other: Option<Gender>,

    /// Default plurality: a CLDR language code (e.g. en, fr, ru) or a zone
    /// list such as `(1)(*)`
    #[arg(long, env = "MARKLOC_PLURALITY")]
    pub plurality: Option<String>,

    /// Escape token; empty disables escaping
    #[arg(long, default_value = "~")]
    pub escape: String,

    /// Resolve into styled text (`*bold*`, `_italic_`)
    #[arg(long)]
    pub styled: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Gender {
    #[value(name = "m")]
    Male,
    #[value(name = "f")]
    Female,
}

/// JSON output for apply results.
#[derive(Serialize)]
struct ApplyJson {
    result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    runs: Option<Vec<RunJson>>,
    warnings: Vec<String>,
}

/// Integers stay integers so plural zones can match them exactly.
fn parse_number(s: &str) -> Result<Number, String> {
    if let Ok(n) = s.parse::<i64>() {
        return Ok(Number::new(n, s));
    }
    s.parse::<f64>()
        .map(|value| Number::new(value, s))
        .map_err(|_| format!("invalid number '{s}'"))
}

/// Zone lists start with `(`; anything else is a language code.
fn plurality(value: &str) -> Result<Arc<dyn Plurality>> {
    if value.is_empty() || value.starts_with('(') {
        let definition: PluralityDefinition = value
            .parse()
            .map_err(|e| miette!("invalid plurality '{value}': {e}"))?;
        return Ok(Arc::new(definition));
    }
    let cldr = CldrPlurality::new(value);
    debug!(requested = value, language = cldr.language(), "using CLDR plurality");
    Ok(Arc::new(cldr))
}

/// Run the apply command.
pub fn run_apply(args: ApplyArgs) -> Result<i32> {
    let config = Config::builder()
        .escape_token(args.escape.clone())
        .maybe_default_plurality(args.plurality.as_deref().map(plurality).transpose()?)
        .build();
    let tokens = CommonTokens::builder()
        .maybe_simple_replacement_1(args.r1.clone())
        .maybe_simple_replacement_2(args.r2.clone())
        .maybe_number(args.number.clone())
        .maybe_gender_me_is_male(args.gender_me.map(|g| matches!(g, Gender::Male)))
        .maybe_gender_other_is_male(args.gender_other.map(|g| matches!(g, Gender::Male)))
        .config(config)
        .build();

    if args.styled {
        let info = tokens
            .str_to_styled()
            .map_err(|e| miette!("invalid token configuration: {e}"))?;
        let (styled, warnings) = resolve(&info, &args.template);
        if args.json {
            print_json(styled.plain(), Some(styled_runs(&styled)), &warnings)?;
        } else {
            print_warnings(&warnings);
            println!("{}", render_styled(&styled));
        }
    } else {
        let info = tokens
            .str_to_str()
            .map_err(|e| miette!("invalid token configuration: {e}"))?;
        let (plain, warnings) = resolve(&info, &args.template);
        if args.json {
            print_json(&plain, None, &warnings)?;
        } else {
            print_warnings(&warnings);
            println!("{plain}");
        }
    }
    Ok(exitcode::OK)
}

/// Parses and resolves `template`, collecting parse and resolve warnings.
fn resolve<D: Text>(info: &ResolvingInfo<String, D>, template: &str) -> (D, Vec<String>) {
    let parsed = info.parse(template);
    let (output, resolve_warnings) = parsed.resolve_with_warnings(info);
    let warnings = parsed
        .warnings()
        .iter()
        .map(ParseWarning::to_string)
        .chain(resolve_warnings.iter().map(ResolveWarning::to_string))
        .collect();
    (output, warnings)
}

fn print_json(result: &str, runs: Option<Vec<RunJson>>, warnings: &[String]) -> Result<()> {
    let output = ApplyJson {
        result: result.to_string(),
        runs,
        warnings: warnings.to_vec(),
    };
    let json = serde_json::to_string_pretty(&output).into_diagnostic()?;
    println!("{json}");
    if !warnings.is_empty() {
        eprintln!("{}", format!("{} warning(s)", warnings.len()).yellow());
    }
    Ok(())
}
