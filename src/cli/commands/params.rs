use anyhow::Result;

use super::super::args::ParamsCommand;
use super::{
    CommandResult, CommandSummary, ParamsSummary,
    helper::{ensure_entry, read_ftl},
};
use crate::core::{EntryIndex, collect_params};

pub fn params(cmd: ParamsCommand) -> Result<CommandResult> {
    let (_, resource) = read_ftl(&cmd.entry.file)?;
    let index = EntryIndex::new(&resource);
    ensure_entry(&index, &cmd.entry)?;

    let params = collect_params(&index, &cmd.entry.key);
    Ok(CommandResult::output(CommandSummary::Params(ParamsSummary {
        params,
    })))
}
