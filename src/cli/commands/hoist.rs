use std::fs;

use anyhow::{Context, Result};
use serde_json::Value;

use super::super::args::HoistCommand;
use super::{CommandResult, CommandSummary, HoistSummary};
use crate::core::{flatten_messages, hoist_selects, render_ftl};

pub fn hoist(cmd: HoistCommand) -> Result<CommandResult> {
    let content = fs::read_to_string(&cmd.file)
        .with_context(|| format!("Failed to read authoring file: {:?}", cmd.file))?;
    let tree: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON: {:?}", cmd.file))?;

    let hoisted = hoist_selects(&tree);
    let summary = if cmd.ftl {
        let messages = flatten_messages(&hoisted)
            .with_context(|| format!("Cannot flatten {:?}", cmd.file))?;
        HoistSummary::Ftl(render_ftl(&messages))
    } else {
        HoistSummary::Json(
            serde_json::to_string_pretty(&hoisted).context("Failed to serialize JSON")?,
        )
    };

    Ok(CommandResult::output(CommandSummary::Hoist(summary)))
}
