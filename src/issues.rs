//! Issue types for FTL verification results.
//!
//! Each issue is self-contained with everything the reporter needs to display
//! it: location, message, rule and optional note or hint.

use enum_dispatch::enum_dispatch;

use crate::core::{MessageContext, SourceContext};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    SyntaxError,
    UndefinedTerm,
    TermPlaceable,
    DashedKey,
    OrphanKey,
    FileError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::SyntaxError => write!(f, "syntax-error"),
            Rule::UndefinedTerm => write!(f, "undefined-term"),
            Rule::TermPlaceable => write!(f, "term-placeable"),
            Rule::DashedKey => write!(f, "dashed-key"),
            Rule::OrphanKey => write!(f, "orphan-key"),
            Rule::FileError => write!(f, "file-error"),
        }
    }
}

// ============================================================
// Issue Types - FTL Source (SourceContext)
// ============================================================

/// Source text that could not be read as an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorIssue {
    pub context: SourceContext,
    /// What the parser expected.
    pub annotation: String,
}

impl SyntaxErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::SyntaxError
    }
}

/// A term reference with no matching term in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedTermIssue {
    pub context: SourceContext,
    /// Term id without the `-` prefix.
    pub term: String,
    /// Index key of the entry holding the reference.
    pub referenced_from: String,
}

impl UndefinedTermIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UndefinedTerm
    }
}

/// A term whose value is not plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermPlaceableIssue {
    pub context: SourceContext,
    pub term: String,
}

impl TermPlaceableIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::TermPlaceable
    }
}

/// A message id containing `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashedKeyIssue {
    pub context: SourceContext,
    pub key: String,
    /// The id with dashes replaced by underscores.
    pub suggestion: String,
}

impl DashedKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::DashedKey
    }
}

// ============================================================
// Issue Types - Messages (MessageContext)
// ============================================================

/// Key defined in a translation but not in the base locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanKeyIssue {
    pub context: MessageContext,
    /// The locale where this orphan key exists.
    pub locale: String,
    pub base_locale: String,
}

impl OrphanKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::OrphanKey
    }
}

// ============================================================
// Special Issue Types
// ============================================================

/// File could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl FileErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::FileError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found in an FTL file.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    SyntaxError(SyntaxErrorIssue),
    UndefinedTerm(UndefinedTermIssue),
    TermPlaceable(TermPlaceableIssue),
    DashedKey(DashedKeyIssue),
    OrphanKey(OrphanKeyIssue),
    FileError(FileErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::SyntaxError(_) => SyntaxErrorIssue::severity(),
            Issue::UndefinedTerm(_) => UndefinedTermIssue::severity(),
            Issue::TermPlaceable(_) => TermPlaceableIssue::severity(),
            Issue::DashedKey(_) => DashedKeyIssue::severity(),
            Issue::OrphanKey(_) => OrphanKeyIssue::severity(),
            Issue::FileError(_) => FileErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::SyntaxError(_) => SyntaxErrorIssue::rule(),
            Issue::UndefinedTerm(_) => UndefinedTermIssue::rule(),
            Issue::TermPlaceable(_) => TermPlaceableIssue::rule(),
            Issue::DashedKey(_) => DashedKeyIssue::rule(),
            Issue::OrphanKey(_) => OrphanKeyIssue::rule(),
            Issue::FileError(_) => FileErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// FTL source location (has source_line for context display).
    Source(&'a SourceContext),
    /// Message definition (key and value, no caret).
    Message(&'a MessageContext),
    /// File-level only.
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards the calls from
/// the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key name, term, annotation, etc.).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for SyntaxErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.annotation.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("the entry is skipped at runtime".to_string())
    }
}

impl Report for UndefinedTermIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("-{}", self.term)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("referenced from {}", self.referenced_from))
    }
}

impl Report for TermPlaceableIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("-{}", self.term)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        Some("term values must be plain text".to_string())
    }
}

impl Report for DashedKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        Some(format!("rename to {}", self.suggestion))
    }
}

impl Report for OrphanKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "in {} (\"{}\"), not in {}",
            self.locale, self.context.value, self.base_locale
        ))
    }
}

impl Report for FileErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.file_path(),
            ReportLocation::Message(ctx) => ctx.file_path(),
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.line(),
            ReportLocation::Message(ctx) => ctx.line(),
            ReportLocation::File { .. } => 0,
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.col(),
            ReportLocation::Message(ctx) => ctx.col(),
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, rule, message
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::core::SourceLocation;
    use crate::issues::*;

    fn source_ctx(path: &str, line: usize, text: &str) -> SourceContext {
        SourceContext::new(SourceLocation::new(path, line, 1), text)
    }

    #[test]
    fn test_issue_enum_severity_and_rule() {
        let issue = Issue::UndefinedTerm(UndefinedTermIssue {
            context: source_ctx("strings_en.ftl", 3, "a = { -brand }"),
            term: "brand".to_string(),
            referenced_from: "a".to_string(),
        });
        assert_eq!(issue.severity(), Severity::Error);
        assert_eq!(issue.rule(), Rule::UndefinedTerm);
        assert_eq!(issue.message(), "-brand");
        assert_eq!(issue.details().as_deref(), Some("referenced from a"));

        let issue = Issue::DashedKey(DashedKeyIssue {
            context: source_ctx("strings_en.ftl", 1, "a-b = x"),
            key: "a-b".to_string(),
            suggestion: "a_b".to_string(),
        });
        assert_eq!(issue.severity(), Severity::Warning);
        assert_eq!(issue.hint().as_deref(), Some("rename to a_b"));
    }

    #[test]
    fn test_orphan_key_details() {
        let ctx = MessageContext::new(
            SourceLocation::new("strings_fr.ftl", 4, 1),
            "extra",
            "En trop",
        );
        let issue = Issue::OrphanKey(OrphanKeyIssue {
            context: ctx,
            locale: "fr".to_string(),
            base_locale: "en".to_string(),
        });
        assert_eq!(issue.severity(), Severity::Warning);
        assert_eq!(
            issue.details().as_deref(),
            Some("in fr (\"En trop\"), not in en")
        );
    }

    #[test]
    fn test_issues_sort_by_file_then_line() {
        let syntax = |path: &str, line: usize| {
            Issue::SyntaxError(SyntaxErrorIssue {
                context: source_ctx(path, line, ""),
                annotation: "expected '='".to_string(),
            })
        };
        let mut issues = vec![syntax("b.ftl", 1), syntax("a.ftl", 9), syntax("a.ftl", 2)];
        issues.sort();

        let order: Vec<_> = issues
            .iter()
            .map(|issue| (issue.sort_file_path().to_string(), issue.sort_line()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a.ftl".to_string(), 2),
                ("a.ftl".to_string(), 9),
                ("b.ftl".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(Rule::SyntaxError.to_string(), "syntax-error");
        assert_eq!(Rule::UndefinedTerm.to_string(), "undefined-term");
        assert_eq!(Rule::TermPlaceable.to_string(), "term-placeable");
        assert_eq!(Rule::DashedKey.to_string(), "dashed-key");
        assert_eq!(Rule::OrphanKey.to_string(), "orphan-key");
        assert_eq!(Rule::FileError.to_string(), "file-error");
    }
}
