//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all fluentc commands.
//! It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `check`: Verify every FTL file under the sources root
//! - `params`: Print the external parameters of a message as JSON
//! - `refs`: Print the ids a message reaches through references as JSON
//! - `hoist`: Expand `select_<var>` shorthand in an authoring JSON file
//! - `patterns`: Print sample renderings of a message
//! - `resolve`: Resolve a message for a locale through its fallback chain
//! - `init`: Initialize fluentc configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Resolve(cmd)) => cmd.common.verbose,
            Some(Command::Params(_))
            | Some(Command::Refs(_))
            | Some(Command::Hoist(_))
            | Some(Command::Patterns(_))
            | Some(Command::Init)
            | None => false,
        }
    }
}

/// Common arguments shared by commands that scan the sources root.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Base locale (overrides config file)
    #[arg(long)]
    pub base_locale: Option<String>,

    /// Directory holding `<name>_<locale>.ftl` files (overrides config file)
    #[arg(long)]
    pub sources_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// A single message in a single FTL file.
#[derive(Debug, Clone, Args)]
pub struct EntryArgs {
    /// FTL file to read
    pub file: PathBuf,

    /// Message id; terms are addressed with a leading `-`
    #[arg(allow_hyphen_values = true)]
    pub key: String,
}

#[derive(Debug, Args)]
pub struct ParamsCommand {
    #[command(flatten)]
    pub entry: EntryArgs,
}

#[derive(Debug, Args)]
pub struct RefsCommand {
    #[command(flatten)]
    pub entry: EntryArgs,
}

#[derive(Debug, Args)]
pub struct PatternsCommand {
    #[command(flatten)]
    pub entry: EntryArgs,
}

#[derive(Debug, Args)]
pub struct HoistCommand {
    /// Authoring JSON file
    pub file: PathBuf,

    /// Print flattened FTL instead of hoisted JSON
    #[arg(long)]
    pub ftl: bool,
}

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Message id
    pub key: String,

    /// Requested locale
    #[arg(short, long)]
    pub locale: String,

    /// Resource name (the `strings` in `strings_en.ftl`); required when the
    /// sources root holds more than one
    #[arg(long)]
    pub name: Option<String>,

    /// Argument passed to the message, as `name=value`; numeric values are
    /// passed as numbers
    #[arg(short, long = "arg", value_name = "NAME=VALUE", value_parser = parse_arg)]
    pub args: Vec<(String, String)>,

    #[command(flatten)]
    pub common: CommonArgs,
}

fn parse_arg(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check FTL files for syntax errors, undefined terms and orphan keys
    Check(CheckCommand),
    /// Print the parameters a message takes, following references
    Params(ParamsCommand),
    /// Print the messages and terms a message references, directly or not
    Refs(RefsCommand),
    /// Expand select_<var> shorthand in an authoring JSON file
    Hoist(HoistCommand),
    /// Print sample renderings of a message for each selector variant
    Patterns(PatternsCommand),
    /// Resolve a message for a locale through its fallback chain
    Resolve(ResolveCommand),
    /// Initialize a new .fluentcrc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arg() {
        assert_eq!(
            parse_arg("count=3"),
            Ok(("count".to_string(), "3".to_string()))
        );
        assert_eq!(
            parse_arg("name=a=b"),
            Ok(("name".to_string(), "a=b".to_string()))
        );
        assert!(parse_arg("=x").is_err());
        assert!(parse_arg("novalue").is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Arguments::command().debug_assert();
    }
}
