//! Command-line interface layer.
//!
//! Parses arguments, runs the command, prints its output and maps the result
//! to an exit code.

use anyhow::Result;

mod args;
mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    report::print(&result, verbose);

    Ok(ExitStatus::from_result(&result))
}
