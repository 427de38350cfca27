/// Main entry point for the fluentc CLI.
///
/// Dispatches to the appropriate command handler based on the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with issue counts and command output
/// - `Err` if the command fails (e.g., unreadable file, strict parse errors)
use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::CommandResult,
    commands::{
        check::check, hoist::hoist, init::init, params::params, patterns::patterns, refs::refs,
        resolve::resolve,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Params(cmd)) => params(cmd),
        Some(Command::Refs(cmd)) => refs(cmd),
        Some(Command::Hoist(cmd)) => hoist(cmd),
        Some(Command::Patterns(cmd)) => patterns(cmd),
        Some(Command::Resolve(cmd)) => resolve(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
