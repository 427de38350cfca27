use std::collections::HashMap;
use std::fmt;

use super::index::EntryLookup;
use super::syntax::{Entry, Message, Resource, build_line_index, offset_to_line, parse};

/// The parsed messages and terms of one locale.
///
/// Built strictly: a source with junk or a repeated id is rejected instead of
/// losing entries silently.
#[derive(Debug)]
pub struct Bundle {
    locale: String,
    resource: Resource,
    /// Index key → position in `resource.body`.
    positions: HashMap<String, usize>,
}

impl Bundle {
    pub fn from_source(locale: impl Into<String>, source: &str) -> Result<Self, BundleError> {
        let locale = locale.into();
        let resource = parse(source);

        if !resource.junk.is_empty() {
            let lines = build_line_index(source);
            let errors = resource
                .junk
                .iter()
                .map(|junk| SyntaxError {
                    line: offset_to_line(&lines, junk.span.start),
                    message: junk.annotation.clone(),
                })
                .collect();
            return Err(BundleError::Syntax { locale, errors });
        }

        let mut positions = HashMap::with_capacity(resource.body.len());
        for (position, entry) in resource.body.iter().enumerate() {
            if positions.insert(entry.index_key(), position).is_some() {
                return Err(BundleError::DuplicateId {
                    locale,
                    id: entry.index_key(),
                });
            }
        }

        Ok(Self {
            locale,
            resource,
            positions,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn has_message(&self, id: &str) -> bool {
        self.get_message(id).is_some()
    }

    pub fn get_message(&self, id: &str) -> Option<&Message> {
        match self.lookup(id)? {
            Entry::Message(message) => Some(message),
            Entry::Term(_) => None,
        }
    }

    /// Message ids in source order.
    pub fn message_ids(&self) -> Vec<&str> {
        self.resource.message_ids()
    }
}

impl EntryLookup for Bundle {
    fn lookup(&self, key: &str) -> Option<&Entry> {
        let position = *self.positions.get(key)?;
        self.resource.body.get(position)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleError {
    Syntax {
        locale: String,
        errors: Vec<SyntaxError>,
    },
    DuplicateId {
        locale: String,
        id: String,
    },
    MissingBaseLocale {
        locale: String,
    },
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleError::Syntax { locale, errors } => {
                write!(f, "syntax errors in locale '{locale}'")?;
                for error in errors {
                    write!(f, "\n  {error}")?;
                }
                Ok(())
            }
            BundleError::DuplicateId { locale, id } => {
                write!(f, "'{id}' is defined more than once in locale '{locale}'")
            }
            BundleError::MissingBaseLocale { locale } => {
                write!(f, "no source for base locale '{locale}'")
            }
        }
    }
}

impl std::error::Error for BundleError {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_lookup_messages_and_terms() {
        let bundle = Bundle::from_source("en", "-brand = Acme\nhello = Hi { -brand }\n").unwrap();

        assert_eq!(bundle.locale(), "en");
        assert!(bundle.has_message("hello"));
        assert!(!bundle.has_message("brand"));
        assert!(!bundle.has_message("-brand"));
        assert!(bundle.lookup("-brand").unwrap().is_term());
        assert_eq!(bundle.message_ids(), vec!["hello"]);
    }

    #[test]
    fn test_junk_is_fatal() {
        let err = Bundle::from_source("fr", "ok = fine\nbroken = { $x\n").unwrap_err();
        let BundleError::Syntax { locale, errors } = &err else {
            panic!("expected syntax error, got {err:?}");
        };
        assert_eq!(locale, "fr");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 2);
        assert!(err.to_string().starts_with("syntax errors in locale 'fr'\n  line 2: "));
    }

    #[test]
    fn test_duplicate_id_is_fatal() {
        let err = Bundle::from_source("en", "a = one\nb = two\na = three\n").unwrap_err();
        assert_eq!(
            err,
            BundleError::DuplicateId {
                locale: "en".to_string(),
                id: "a".to_string(),
            }
        );
    }

    #[test]
    fn test_message_and_term_may_share_a_name() {
        let bundle = Bundle::from_source("en", "brand = Message\n-brand = Term\n").unwrap();
        assert!(bundle.has_message("brand"));
        assert!(bundle.lookup("-brand").is_some());
    }
}
