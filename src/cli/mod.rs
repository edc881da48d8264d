// CLI module
// Command-line arguments and command execution

mod args;
mod commands;

pub use args::{CliArgs, Command, KindArg};
pub use commands::execute;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing subcommand, or `--help`),
/// clap prints an error or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
