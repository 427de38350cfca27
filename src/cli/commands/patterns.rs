use anyhow::Result;

use super::super::args::PatternsCommand;
use super::{
    CommandResult, CommandSummary, PatternsSummary,
    helper::{ensure_entry, read_ftl},
};
use crate::core::{EntryIndex, sample_renderings};

pub fn patterns(cmd: PatternsCommand) -> Result<CommandResult> {
    let (_, resource) = read_ftl(&cmd.entry.file)?;
    let index = EntryIndex::new(&resource);
    ensure_entry(&index, &cmd.entry)?;

    let samples = sample_renderings(&index, &cmd.entry.key);
    Ok(CommandResult::output(CommandSummary::Patterns(
        PatternsSummary {
            key: cmd.entry.key,
            samples,
        },
    )))
}
