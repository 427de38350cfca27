//! Discovery of `<name>_<locale>.ftl` files under a sources root.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use glob::Pattern;
use regex::Regex;
use walkdir::WalkDir;

static SOURCE_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+?)_(?P<locale>[a-z]{2,3}(?:_[A-Z]{2})?)\.ftl$").unwrap()
});

/// An FTL file found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceFile {
    /// Resource name shared by all locales (`strings` in `strings_en.ftl`).
    pub name: String,
    pub locale: String,
    pub path: PathBuf,
}

impl SourceFile {
    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read FTL file: {:?}", self.path))
    }
}

/// Result of scanning for FTL files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Sorted by name, then locale.
    pub files: Vec<SourceFile>,
    pub skipped_count: usize,
}

impl ScanResult {
    /// Files grouped by resource name, then locale.
    pub fn groups(&self) -> BTreeMap<&str, BTreeMap<&str, &SourceFile>> {
        let mut groups: BTreeMap<&str, BTreeMap<&str, &SourceFile>> = BTreeMap::new();
        for file in &self.files {
            groups
                .entry(file.name.as_str())
                .or_default()
                .insert(file.locale.as_str(), file);
        }
        groups
    }
}

/// Split `strings_es_MX.ftl` into `("strings", "es_MX")`.
pub fn parse_file_name(file_name: &str) -> Option<(String, String)> {
    let caps = SOURCE_FILE_NAME.captures(file_name)?;
    Some((caps["name"].to_string(), caps["locale"].to_string()))
}

/// Walk `root` for FTL source files, skipping paths that match any of the
/// `ignores` glob patterns.
pub fn scan_sources(
    root: impl AsRef<Path>,
    ignores: &[String],
    verbose: bool,
) -> Result<ScanResult> {
    let root = root.as_ref();
    if !root.exists() {
        bail!(
            "Sources directory '{}' does not exist.\n\
             Hint: Check your .fluentcrc.json 'sourcesRoot' setting.",
            root.display()
        );
    }
    if !root.is_dir() {
        bail!("'{}' is not a directory.", root.display());
    }

    let mut patterns = Vec::new();
    for ignore in ignores {
        match Pattern::new(ignore) {
            Ok(pattern) => patterns.push(pattern),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} Invalid ignore pattern '{}': {}",
                        "warning:".bold().yellow(),
                        ignore,
                        e
                    );
                }
            }
        }
    }

    let mut result = ScanResult::default();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                result.skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let path_str = path.to_string_lossy();
        if patterns.iter().any(|p| p.matches(&path_str)) {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some((name, locale)) = parse_file_name(file_name) {
            result.files.push(SourceFile {
                name,
                locale,
                path: path.to_path_buf(),
            });
        } else if verbose && file_name.ends_with(".ftl") {
            eprintln!(
                "{} Skipping '{}': expected <name>_<locale>.ftl",
                "warning:".bold().yellow(),
                path.display()
            );
        }
    }

    result.files.sort();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_parse_file_name() {
        assert_eq!(
            parse_file_name("strings_en.ftl"),
            Some(("strings".to_string(), "en".to_string()))
        );
        assert_eq!(
            parse_file_name("my_sim_strings_es_MX.ftl"),
            Some(("my_sim_strings".to_string(), "es_MX".to_string()))
        );
        assert_eq!(
            parse_file_name("a11y_fil.ftl"),
            Some(("a11y".to_string(), "fil".to_string()))
        );
        assert_eq!(parse_file_name("strings.ftl"), None);
        assert_eq!(parse_file_name("strings_en.json"), None);
        assert_eq!(parse_file_name("strings_EN.ftl"), None);
    }

    #[test]
    fn test_scan_sources_groups_by_name() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("nested")).unwrap();
        File::create(root.join("strings_en.ftl")).unwrap();
        File::create(root.join("strings_fr.ftl")).unwrap();
        File::create(root.join("nested").join("other_en.ftl")).unwrap();
        File::create(root.join("notes.txt")).unwrap();

        let result = scan_sources(root, &[], false).unwrap();
        assert_eq!(result.files.len(), 3);

        let groups = result.groups();
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["other", "strings"]);
        assert_eq!(
            groups["strings"].keys().copied().collect::<Vec<_>>(),
            vec!["en", "fr"]
        );
    }

    #[test]
    fn test_scan_sources_honors_ignores() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("drafts")).unwrap();
        File::create(root.join("strings_en.ftl")).unwrap();
        File::create(root.join("drafts").join("strings_de.ftl")).unwrap();

        let result = scan_sources(root, &["**/drafts/**".to_string()], false).unwrap();
        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].locale, "en");
    }

    #[test]
    fn test_scan_missing_root() {
        let dir = tempdir().unwrap();
        let err = scan_sources(dir.path().join("nope"), &[], false).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
