//! FTL abstract syntax tree.
//!
//! The expression vocabulary is closed: consumers dispatch with `match` on
//! [`Expression`] and never extend it.

use std::ops::Range;

/// Prefix that puts terms in their own namespace inside an [`EntryIndex`](crate::core::EntryIndex).
pub const TERM_PREFIX: char = '-';

/// Parsed form of one locale's source text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    /// Well-formed entries, in source order.
    pub body: Vec<Entry>,
    /// Slices the parser could not read as an entry.
    pub junk: Vec<Junk>,
}

impl Resource {
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.body.iter().filter_map(|entry| match entry {
            Entry::Message(message) => Some(message),
            Entry::Term(_) => None,
        })
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.body.iter().filter_map(|entry| match entry {
            Entry::Term(term) => Some(term),
            Entry::Message(_) => None,
        })
    }

    /// Ids of every message (terms excluded), in source order.
    pub fn message_ids(&self) -> Vec<&str> {
        self.messages().map(|m| m.id.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Message(Message),
    Term(Term),
}

impl Entry {
    /// Bare id, without the term prefix.
    pub fn id(&self) -> &str {
        match self {
            Entry::Message(message) => &message.id,
            Entry::Term(term) => &term.id,
        }
    }

    /// Id as stored in the entry index: `id` for messages, `-id` for terms.
    pub fn index_key(&self) -> String {
        match self {
            Entry::Message(message) => message.id.clone(),
            Entry::Term(term) => format!("{TERM_PREFIX}{}", term.id),
        }
    }

    pub fn value(&self) -> Option<&Pattern> {
        match self {
            Entry::Message(message) => message.value.as_ref(),
            Entry::Term(term) => Some(&term.value),
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Entry::Message(message) => &message.attributes,
            Entry::Term(term) => &term.attributes,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes().iter().find(|attr| attr.id == name)
    }

    pub fn is_term(&self) -> bool {
        matches!(self, Entry::Term(_))
    }

    /// Byte range of the entry in its source text.
    pub fn span(&self) -> &Range<usize> {
        match self {
            Entry::Message(message) => &message.span,
            Entry::Term(term) => &term.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub value: Option<Pattern>,
    pub attributes: Vec<Attribute>,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub id: String,
    pub value: Pattern,
    pub attributes: Vec<Attribute>,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub id: String,
    pub value: Pattern,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pattern {
    pub elements: Vec<PatternElement>,
}

impl Pattern {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            elements: vec![PatternElement::Text(text.into())],
        }
    }

    /// True if the pattern is a single run of text with no placeables.
    pub fn is_plain_text(&self) -> bool {
        self.elements
            .iter()
            .all(|el| matches!(el, PatternElement::Text(_)))
    }

    pub fn has_placeable(&self) -> bool {
        !self.is_plain_text()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatternElement {
    Text(String),
    Placeable(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    StringLiteral(String),
    /// Raw source text of the number, e.g. `-3.50`.
    NumberLiteral(String),
    VariableReference(String),
    MessageReference(String),
    TermReference {
        id: String,
        arguments: Option<CallArguments>,
    },
    Select {
        selector: Box<Expression>,
        variants: Vec<Variant>,
    },
    Call {
        callee: String,
        arguments: CallArguments,
    },
    /// `msg.attr` or `-term.attr`.
    Attribute {
        reference: Box<Expression>,
        name: String,
    },
    /// Legacy `-term[key]` access.
    Variant {
        reference: Box<Expression>,
        key: VariantKey,
    },
    /// An inline placeable nested in another: `{ { $x } }`.
    Placeable(Box<Expression>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArguments {
    pub positional: Vec<Expression>,
    pub named: Vec<NamedArgument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedArgument {
    pub name: String,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub key: VariantKey,
    pub value: Pattern,
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VariantKey {
    Identifier(String),
    /// Raw source text of the number.
    Number(String),
}

impl VariantKey {
    pub fn as_str(&self) -> &str {
        match self {
            VariantKey::Identifier(name) => name,
            VariantKey::Number(raw) => raw,
        }
    }
}

/// Source text the parser skipped, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct Junk {
    pub content: String,
    pub annotation: String,
    pub span: Range<usize>,
}
