use std::sync::Arc;

use anyhow::{Context, Result, bail};

use super::super::args::ResolveCommand;
use super::{
    CommandResult, CommandSummary, ResolveSummary,
    helper::CommandContext,
};
use crate::core::{
    ArgValue, BuildOptions, FormatArgs, LocaleCell, ScanResult, SourceFile, build_module,
    scan_sources,
};

pub fn resolve(cmd: ResolveCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;
    let scan = scan_sources(&ctx.sources_root, &ctx.config.ignores, ctx.verbose)?;
    let files = select_resource(&scan, cmd.name.as_deref())?;

    let mut sources = Vec::with_capacity(files.len());
    for file in &files {
        sources.push((file.locale.clone(), file.read()?));
    }

    let locale_data = ctx.config.load_locale_data(&ctx.base_dir)?;
    let chain = locale_data.fallback_chain(&cmd.locale);
    if ctx.verbose {
        eprintln!("Fallback chain for {}: {}", cmd.locale, chain);
    }

    let cell = Arc::new(LocaleCell::new(cmd.locale.clone()));
    let options = BuildOptions {
        base_locale: ctx.base_locale.clone(),
        locale_data,
    };
    let module = build_module(sources, options, cell)
        .with_context(|| format!("Failed to build messages from {}", ctx.sources_root.display()))?;

    let Some(message) = module.get(&cmd.key) else {
        bail!(
            "'{}' is not a message of the base locale '{}'",
            cmd.key,
            ctx.base_locale
        );
    };
    let resolved = message.get()?;
    let formatted = resolved.format(&format_args(&cmd.args));

    Ok(CommandResult::output(CommandSummary::Resolve(
        ResolveSummary {
            key: cmd.key,
            requested_locale: cmd.locale,
            locale: resolved.locale().to_string(),
            chain: chain.to_string(),
            text: formatted.value,
            format_errors: formatted.errors.iter().map(ToString::to_string).collect(),
        },
    )))
}

/// The files of the resource named `name`, or of the only resource present.
fn select_resource<'s>(scan: &'s ScanResult, name: Option<&str>) -> Result<Vec<&'s SourceFile>> {
    let groups = scan.groups();
    let locales = match name {
        Some(name) => match groups.get(name) {
            Some(locales) => locales,
            None => bail!("No FTL files named '{}_<locale>.ftl' found", name),
        },
        None => {
            let mut names = groups.keys();
            match (names.next(), names.next()) {
                (Some(only), None) => &groups[only],
                (None, _) => bail!("No FTL files found"),
                (Some(_), Some(_)) => bail!(
                    "Several resources found ({}); pick one with --name",
                    groups.keys().copied().collect::<Vec<_>>().join(", ")
                ),
            }
        }
    };
    Ok(locales.values().copied().collect())
}

fn format_args(args: &[(String, String)]) -> FormatArgs {
    args.iter()
        .map(|(name, value)| {
            let value = match value.parse::<f64>() {
                Ok(n) if n.is_finite() => ArgValue::Number(n),
                _ => ArgValue::Text(value.clone()),
            };
            (name.clone(), value)
        })
        .collect()
}
