use anyhow::Result;

use super::super::args::RefsCommand;
use super::{
    CommandResult, CommandSummary, RefsSummary,
    helper::{ensure_entry, read_ftl},
};
use crate::core::{EntryIndex, collect_internal_references};

pub fn refs(cmd: RefsCommand) -> Result<CommandResult> {
    let (_, resource) = read_ftl(&cmd.entry.file)?;
    let index = EntryIndex::new(&resource);
    ensure_entry(&index, &cmd.entry)?;

    let references = collect_internal_references(&index, &cmd.entry.key);
    Ok(CommandResult::output(CommandSummary::Refs(RefsSummary {
        references,
    })))
}
