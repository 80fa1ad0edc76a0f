//! Implementation of the `markloc check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use markloc::{CommonTokens, Config, ParsedTemplate};
use miette::{IntoDiagnostic, Report, Result, miette};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::output::TemplateDiagnostic;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Template files to check, one template per line
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Escape token; empty disables escaping
    #[arg(long, default_value = "~")]
    pub escape: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one warning.
#[derive(Debug, Serialize)]
struct WarningJson {
    file: String,
    line: usize,
    message: String,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let config = Config::builder().escape_token(args.escape).build();
    let info = CommonTokens::parsing_info(&config)
        .map_err(|e| miette!("invalid token configuration: {e}"))?;

    let mut found: Vec<WarningJson> = Vec::new();
    for path in &args.files {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read {}: {e}", path.display()))?;

        let mut line_start = 0;
        for (index, line) in content.split_inclusive('\n').enumerate() {
            let template = line.trim_end_matches(['\n', '\r']);
            let parsed = ParsedTemplate::parse(template.to_string(), &info);
            for warning in parsed.warnings() {
                if !args.json {
                    let diagnostic =
                        TemplateDiagnostic::from_parse_warning(path, &content, line_start, warning);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                found.push(WarningJson {
                    file: path.display().to_string(),
                    line: index + 1,
                    message: warning.to_string(),
                });
            }
            line_start += line.len();
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&found).into_diagnostic()?);
    } else if found.is_empty() {
        println!(
            "{} {} file(s) checked",
            "ok:".if_supports_color(Stream::Stdout, |text| text.green()),
            args.files.len()
        );
    }

    if found.is_empty() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
