use std::collections::{BTreeSet, HashMap};

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;

use super::super::args::CheckCommand;
use super::{
    CommandResult, CommandSummary,
    helper::{CommandContext, finish},
};
use crate::{
    core::{LocaleSource, SourceFile, find_orphan_keys, scan_sources, verify_resource},
    issues::{FileErrorIssue, Issue},
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;
    let scan = scan_sources(&ctx.sources_root, &ctx.config.ignores, ctx.verbose)?;

    if ctx.verbose {
        eprintln!(
            "Checking {} FTL file(s) in {}",
            scan.files.len(),
            ctx.sources_root.display()
        );
        if scan.skipped_count > 0 {
            eprintln!("Skipped {} unreadable path(s)", scan.skipped_count);
        }
    }

    let results: Vec<(&SourceFile, Result<String>)> = scan
        .files
        .par_iter()
        .map(|file| (file, file.read()))
        .collect();

    let mut all_issues: Vec<Issue> = Vec::new();
    let mut texts: HashMap<&SourceFile, String> = HashMap::new();
    for (file, text) in results {
        match text {
            Ok(text) => {
                texts.insert(file, text);
            }
            Err(e) => all_issues.push(Issue::FileError(FileErrorIssue {
                file_path: file.display_path(),
                error: format!("{:#}", e),
            })),
        }
    }

    let verified: Vec<Vec<Issue>> = texts
        .par_iter()
        .map(|(file, text)| verify_resource(&file.display_path(), text))
        .collect();
    all_issues.extend(verified.into_iter().flatten());

    for (name, locales) in scan.groups() {
        let Some(base_file) = locales.get(ctx.base_locale.as_str()) else {
            if ctx.verbose {
                eprintln!(
                    "{} '{}' has no {} file, skipping orphan check",
                    "warning:".bold().yellow(),
                    name,
                    ctx.base_locale
                );
            }
            continue;
        };
        let Some(base_text) = texts.get(base_file) else {
            continue;
        };

        let base = LocaleSource::new(&base_file.locale, base_file.display_path(), base_text);
        let translations: Vec<LocaleSource> = locales
            .values()
            .filter(|file| file.locale != base_file.locale)
            .filter_map(|file| {
                texts
                    .get(*file)
                    .map(|text| LocaleSource::new(&file.locale, file.display_path(), text))
            })
            .collect();
        all_issues.extend(find_orphan_keys(&base, &translations));
    }

    let locale_count = scan
        .files
        .iter()
        .map(|file| file.locale.as_str())
        .collect::<BTreeSet<_>>()
        .len();

    Ok(finish(
        CommandSummary::Check,
        all_issues,
        scan.files.len(),
        locale_count,
    ))
}
