//! Author-facing checks over FTL files.

use std::collections::HashSet;

use super::index::EntryIndex;
use super::location::{MessageContext, SourceContext, SourceLocation};
use super::references::direct_references;
use super::syntax::{Entry, TERM_PREFIX, parse, serialize_pattern};
use crate::issues::{
    DashedKeyIssue, Issue, OrphanKeyIssue, SyntaxErrorIssue, TermPlaceableIssue,
    UndefinedTermIssue,
};

/// The text of one locale's FTL file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSource {
    pub locale: String,
    pub path: String,
    pub text: String,
}

impl LocaleSource {
    pub fn new(
        locale: impl Into<String>,
        path: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            locale: locale.into(),
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Check one file for syntax errors, undefined terms, terms with placeables
/// and dashed message ids.
pub fn verify_resource(path: &str, text: &str) -> Vec<Issue> {
    let resource = parse(text);
    let mut issues = Vec::new();

    for junk in &resource.junk {
        issues.push(Issue::SyntaxError(SyntaxErrorIssue {
            context: SourceContext::at_offset(path, text, junk.span.start),
            annotation: junk.annotation.clone(),
        }));
    }

    let index = EntryIndex::new(&resource);
    for entry in &resource.body {
        let key = entry.index_key();

        for reference in direct_references(&index, &key) {
            let Some(term) = reference.strip_prefix(TERM_PREFIX) else {
                continue;
            };
            if index.contains_key(&reference) {
                continue;
            }
            issues.push(Issue::UndefinedTerm(UndefinedTermIssue {
                context: reference_context(path, text, entry, &reference),
                term: term.to_string(),
                referenced_from: key.clone(),
            }));
        }

        match entry {
            Entry::Term(term) if term.value.has_placeable() => {
                issues.push(Issue::TermPlaceable(TermPlaceableIssue {
                    context: SourceContext::at_offset(path, text, term.span.start),
                    term: term.id.clone(),
                }));
            }
            Entry::Message(message) if message.id.contains('-') => {
                issues.push(Issue::DashedKey(DashedKeyIssue {
                    context: SourceContext::at_offset(path, text, message.span.start),
                    key: message.id.clone(),
                    suggestion: message.id.replace('-', "_"),
                }));
            }
            _ => {}
        }
    }

    issues
}

/// Messages defined in a translation but absent from the base locale.
///
/// Keys missing from a translation are not reported; partial translations
/// fall back at runtime.
pub fn find_orphan_keys(base: &LocaleSource, translations: &[LocaleSource]) -> Vec<Issue> {
    let base_resource = parse(&base.text);
    let base_ids: HashSet<&str> = base_resource.message_ids().into_iter().collect();

    let mut issues = Vec::new();
    for translation in translations {
        if translation.locale == base.locale {
            continue;
        }
        let resource = parse(&translation.text);
        for message in resource.messages() {
            if base_ids.contains(message.id.as_str()) {
                continue;
            }
            let value = message
                .value
                .as_ref()
                .map(serialize_pattern)
                .unwrap_or_default();
            issues.push(Issue::OrphanKey(OrphanKeyIssue {
                context: MessageContext::new(
                    SourceLocation::from_offset(
                        &translation.path,
                        &translation.text,
                        message.span.start,
                    ),
                    &message.id,
                    value,
                ),
                locale: translation.locale.clone(),
                base_locale: base.locale.clone(),
            }));
        }
    }
    issues
}

/// Points at the first `-term` in the entry's source, or the entry itself.
fn reference_context(path: &str, text: &str, entry: &Entry, reference: &str) -> SourceContext {
    let span = entry.span();
    let offset = text
        .get(span.clone())
        .and_then(|source| source.find(reference))
        .map_or(span.start, |found| span.start + found);
    SourceContext::at_offset(path, text, offset)
}
