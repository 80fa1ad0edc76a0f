//! Implementation of the `markloc escape` command.

use clap::Args;
use markloc::tokens::escape;
use miette::Result;

/// Arguments for the escape command.
#[derive(Debug, Args)]
pub struct EscapeArgs {
    /// Text to escape
    pub text: String,

    /// Escape token
    #[arg(long, default_value = "~")]
    pub escape: String,
}

/// Run the escape command.
pub fn run_escape(args: EscapeArgs) -> Result<i32> {
    println!("{}", escape(&args.text, &args.escape));
    Ok(exitcode::OK)
}
