use crate::core::{ParamInfo, Sample};
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Params(ParamsSummary),
    Refs(RefsSummary),
    Hoist(HoistSummary),
    Patterns(PatternsSummary),
    Resolve(ResolveSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ParamsSummary {
    pub params: Vec<ParamInfo>,
}

#[derive(Debug)]
pub struct RefsSummary {
    pub references: Vec<String>,
}

#[derive(Debug)]
pub enum HoistSummary {
    /// Hoisted authoring tree, pretty-printed.
    Json(String),
    /// Flattened FTL source.
    Ftl(String),
}

#[derive(Debug)]
pub struct PatternsSummary {
    pub key: String,
    pub samples: Vec<Sample>,
}

#[derive(Debug)]
pub struct ResolveSummary {
    pub key: String,
    pub requested_locale: String,
    /// Locale of the bundle the message came from.
    pub locale: String,
    pub chain: String,
    pub text: String,
    pub format_errors: Vec<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running fluentc commands
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when any issue was found.
    pub exit_on_errors: bool,
    /// All issues found during the check.
    /// Empty for non-check commands.
    pub issues: Vec<Issue>,
    /// Number of files that could not be read.
    pub file_error_count: usize,
    /// Number of FTL files that were checked.
    pub files_checked: usize,
    /// Number of distinct locales among the checked files.
    pub locales_checked: usize,
}

impl CommandResult {
    /// Result of a command that only produces output.
    pub fn output(summary: CommandSummary) -> Self {
        Self {
            summary,
            error_count: 0,
            warning_count: 0,
            exit_on_errors: false,
            issues: Vec::new(),
            file_error_count: 0,
            files_checked: 0,
            locales_checked: 0,
        }
    }
}
