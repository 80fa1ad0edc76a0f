//! markloc CLI entry point.
//!
//! Provides command-line tools for working with markloc templates:
//! - `markloc apply` - Resolve a template with the common tokens
//! - `markloc tree` - Show the directives of a template
//! - `markloc check` - Report parse warnings in template files
//! - `markloc escape` - Escape the common tokens in a text

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    ApplyArgs, CheckArgs, EscapeArgs, TreeArgs, run_apply, run_check, run_escape, run_tree,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// markloc template tools.
#[derive(Debug, Parser)]
#[command(name = "markloc")]
#[command(about = "markloc template tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Log parse and resolve diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a template with the common tokens
    Apply(ApplyArgs),
    /// Print the directive tree of a template
    Tree(TreeArgs),
    /// Check every line of template files for parse warnings
    Check(CheckArgs),
    /// Escape every common token in a text
    Escape(EscapeArgs),
}

fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors checks TTY, NO_COLOR and FORCE_COLOR itself
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Logs go to stderr so command output stays parseable. `RUST_LOG` wins
/// over `--verbose`.
fn setup_logging(verbose: bool) {
    let default_level = if verbose { "markloc=debug" } else { "markloc=error" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(layer().with_writer(stderr).with_target(false))
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Apply(args) => run_apply(args),
        Commands::Tree(args) => run_tree(args),
        Commands::Check(args) => run_check(args),
        Commands::Escape(args) => run_escape(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            exit(exitcode::SOFTWARE);
        }
    }
}
