//! Implementation of the `markloc tree` command.

use clap::Args;
use markloc::{CommonTokens, Config, Directive, ParsedTemplate};
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;

use crate::output::print_warnings;
use crate::output::table::format_tree_table;

/// Arguments for the tree command.
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Template to parse
    pub template: String,

    /// Escape token; empty disables escaping
    #[arg(long, default_value = "~")]
    pub escape: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one directive, with its depth in the forest.
#[derive(Serialize)]
struct DirectiveJson<'a> {
    depth: usize,
    #[serde(flatten)]
    directive: &'a Directive,
}

#[derive(Serialize)]
struct TreeJson<'a> {
    untokenized: &'a str,
    directives: Vec<DirectiveJson<'a>>,
    warnings: Vec<String>,
}

/// Run the tree command.
pub fn run_tree(args: TreeArgs) -> Result<i32> {
    let config = Config::builder().escape_token(args.escape).build();
    let info = CommonTokens::parsing_info(&config)
        .map_err(|e| miette!("invalid token configuration: {e}"))?;
    let template = ParsedTemplate::parse(args.template, &info);
    let warnings: Vec<String> = template.warnings().iter().map(ToString::to_string).collect();

    if args.json {
        let tree = template.tree();
        let output = TreeJson {
            untokenized: template.untokenized(),
            directives: tree
                .pre_order()
                .into_iter()
                .map(|(depth, id)| DirectiveJson {
                    depth,
                    directive: &tree[id],
                })
                .collect(),
            warnings,
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        print_warnings(&warnings);
        println!("{}", template.untokenized());
        if !template.tree().is_empty() {
            println!("{}", format_tree_table(&template));
        }
    }
    Ok(exitcode::OK)
}
