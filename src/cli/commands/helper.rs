use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary};
use crate::{
    cli::args::{CommonArgs, EntryArgs},
    config::{Config, load_config},
    core::{
        EntryIndex,
        syntax::{Resource, parse},
    },
    issues::{Issue, Severity},
};

/// Configuration merged with command-line overrides.
pub struct CommandContext {
    pub config: Config,
    /// Directory the command was started from; relative config paths are
    /// resolved against it.
    pub base_dir: PathBuf,
    pub sources_root: PathBuf,
    pub base_locale: String,
    pub verbose: bool,
}

impl CommandContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let base_dir = env::current_dir().context("Failed to read current directory")?;
        let loaded = load_config(&base_dir)?;
        if common.verbose && !loaded.from_file {
            eprintln!("No config file found, using defaults.");
        }
        let config = loaded.config;

        let sources_root = common
            .sources_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.sources_root));
        let base_locale = common
            .base_locale
            .clone()
            .unwrap_or_else(|| config.base_locale.clone());

        Ok(Self {
            config,
            base_dir,
            sources_root,
            base_locale,
            verbose: common.verbose,
        })
    }
}

pub fn read_ftl(path: &Path) -> Result<(String, Resource)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read FTL file: {:?}", path))?;
    let resource = parse(&text);
    Ok((text, resource))
}

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    files_checked: usize,
    locales_checked: usize,
) -> CommandResult {
    issues.sort();

    let file_error_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::FileError(_)))
        .count();
    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    CommandResult {
        summary,
        error_count,
        warning_count,
        exit_on_errors: true,
        issues,
        file_error_count,
        files_checked,
        locales_checked,
    }
}

/// Fail with the file name when `entry.key` is not defined in it.
pub fn ensure_entry(index: &EntryIndex<'_>, entry: &EntryArgs) -> Result<()> {
    if !index.contains_key(&entry.key) {
        anyhow::bail!("'{}' is not defined in {}", entry.key, entry.file.display());
    }
    Ok(())
}
