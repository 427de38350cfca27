//! Renders patterns to text.
//!
//! Formatting never fails: anything that cannot be resolved is written as a
//! visible marker (`{$name}`, `{id}`, `{-id}`, `{NAME()}`, `{???}`) and
//! recorded in [`FormattedPattern::errors`].

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::index::EntryLookup;
use super::references::{VariantValue, collect_params};
use super::syntax::{
    CallArguments, Entry, Expression, Pattern, PatternElement, TERM_PREFIX, Variant, VariantKey,
};

/// Upper bound on [`sample_renderings`] per pattern.
pub const MAX_SAMPLES: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Text(text) => f.write_str(text),
            ArgValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Text(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Number(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Number(value as f64)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Number(f64::from(value))
    }
}

pub type FormatArgs = HashMap<String, ArgValue>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    UnknownVariable(String),
    UnknownMessage(String),
    UnknownTerm(String),
    UnknownAttribute { id: String, name: String },
    NoValue(String),
    UnknownFunction(String),
    MissingArgument(String),
    Cyclic(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownVariable(name) => write!(f, "unknown variable: ${name}"),
            FormatError::UnknownMessage(id) => write!(f, "unknown message: {id}"),
            FormatError::UnknownTerm(id) => write!(f, "unknown term: {TERM_PREFIX}{id}"),
            FormatError::UnknownAttribute { id, name } => {
                write!(f, "unknown attribute: {id}.{name}")
            }
            FormatError::NoValue(id) => write!(f, "message has no value: {id}"),
            FormatError::UnknownFunction(name) => write!(f, "unknown function: {name}()"),
            FormatError::MissingArgument(name) => {
                write!(f, "{name}() expects a positional argument")
            }
            FormatError::Cyclic(key) => write!(f, "cyclic reference: {key}"),
        }
    }
}

impl std::error::Error for FormatError {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormattedPattern {
    pub value: String,
    pub errors: Vec<FormatError>,
}

/// Render `pattern` against the entries of `index`.
pub fn format_pattern<L: EntryLookup + ?Sized>(
    index: &L,
    pattern: &Pattern,
    args: &FormatArgs,
) -> FormattedPattern {
    let mut scope = Scope::new(index);
    let value = scope.pattern(pattern, args);
    FormattedPattern {
        value,
        errors: scope.errors,
    }
}

/// Render the value (or the named attribute) of the entry at `key`.
///
/// `None` when the entry or attribute does not exist.
pub fn format_entry<L: EntryLookup + ?Sized>(
    index: &L,
    key: &str,
    attribute: Option<&str>,
    args: &FormatArgs,
) -> Option<FormattedPattern> {
    let entry = index.lookup(key)?;
    let pattern = match attribute {
        Some(name) => &entry.attribute(name)?.value,
        None => entry.value()?,
    };

    let mut scope = Scope::new(index);
    scope.active.push(active_key(key, attribute));
    let value = scope.pattern(pattern, args);
    Some(FormattedPattern {
        value,
        errors: scope.errors,
    })
}

/// One rendering produced by [`sample_renderings`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    pub text: String,
}

/// Representative renderings of the entry at `key`, for the value and then
/// each attribute.
///
/// Sample `i` gives every selector parameter its `i`-th known variant (wrapping
/// around) and every free parameter the text `<name><i>`. Each pattern gets as
/// many samples as the longest variant list, capped at [`MAX_SAMPLES`].
pub fn sample_renderings<L: EntryLookup + ?Sized>(index: &L, key: &str) -> Vec<Sample> {
    let Some(entry) = index.lookup(key) else {
        return Vec::new();
    };

    let params = collect_params(index, key);
    let count = params
        .iter()
        .filter_map(|param| param.variants.as_ref().map(Vec::len))
        .max()
        .unwrap_or(1)
        .clamp(1, MAX_SAMPLES);

    let sample_args = |i: usize| -> FormatArgs {
        params
            .iter()
            .map(|param| {
                let value = match param.variants.as_deref() {
                    Some(variants) if !variants.is_empty() => {
                        sample_value(&variants[i % variants.len()])
                    }
                    _ => ArgValue::Text(format!("{}{i}", param.name)),
                };
                (param.name.clone(), value)
            })
            .collect()
    };

    let targets = entry
        .value()
        .map(|_| None)
        .into_iter()
        .chain(entry.attributes().iter().map(|attr| Some(attr.id.as_str())));

    let mut samples = Vec::new();
    for attribute in targets {
        for i in 0..count {
            if let Some(rendered) = format_entry(index, key, attribute, &sample_args(i)) {
                samples.push(Sample {
                    attribute: attribute.map(str::to_string),
                    text: rendered.value,
                });
            }
        }
    }
    samples
}

/// Categories are passed as their keyword so the matching branch is chosen
/// by exact key.
fn sample_value(variant: &VariantValue) -> ArgValue {
    match variant {
        VariantValue::Text(text) => ArgValue::Text(text.clone()),
        VariantValue::Number(n) => ArgValue::Number(*n),
        VariantValue::Category(category) => ArgValue::Text(category.as_str().to_string()),
    }
}

/// English plural rule.
pub fn plural_category(n: f64) -> &'static str {
    if n == 1.0 { "one" } else { "other" }
}

fn active_key(key: &str, attribute: Option<&str>) -> String {
    match attribute {
        Some(name) => format!("{key}.{name}"),
        None => key.to_string(),
    }
}

enum Resolved {
    Text(String),
    Number(f64),
}

impl Resolved {
    fn into_string(self) -> String {
        match self {
            Resolved::Text(text) => text,
            Resolved::Number(n) => n.to_string(),
        }
    }
}

impl From<&ArgValue> for Resolved {
    fn from(value: &ArgValue) -> Self {
        match value {
            ArgValue::Text(text) => Resolved::Text(text.clone()),
            ArgValue::Number(n) => Resolved::Number(*n),
        }
    }
}

struct Scope<'a, L: ?Sized> {
    index: &'a L,
    errors: Vec<FormatError>,
    /// Entries currently being rendered, as `key` or `key.attribute`.
    active: Vec<String>,
}

impl<'a, L: EntryLookup + ?Sized> Scope<'a, L> {
    fn new(index: &'a L) -> Self {
        Self {
            index,
            errors: Vec::new(),
            active: Vec::new(),
        }
    }

    fn pattern(&mut self, pattern: &Pattern, args: &FormatArgs) -> String {
        let mut out = String::new();
        for element in &pattern.elements {
            match element {
                PatternElement::Text(text) => out.push_str(text),
                PatternElement::Placeable(expression) => {
                    out.push_str(&self.expression(expression, args).into_string())
                }
            }
        }
        out
    }

    fn expression(&mut self, expression: &Expression, args: &FormatArgs) -> Resolved {
        match expression {
            Expression::StringLiteral(value) => Resolved::Text(value.clone()),
            Expression::NumberLiteral(raw) => match raw.parse::<f64>() {
                Ok(n) => Resolved::Number(n),
                Err(_) => Resolved::Text(raw.clone()),
            },
            Expression::VariableReference(name) => match args.get(name) {
                Some(value) => value.into(),
                None => {
                    self.errors.push(FormatError::UnknownVariable(name.clone()));
                    Resolved::Text(format!("{{${name}}}"))
                }
            },
            Expression::MessageReference(id) => self.message(id, None, args),
            Expression::TermReference { id, arguments } => self.term(id, None, arguments, args),
            Expression::Attribute { reference, name } => match reference.as_ref() {
                Expression::MessageReference(id) => self.message(id, Some(name), args),
                Expression::TermReference { id, arguments } => {
                    self.term(id, Some(name), arguments, args)
                }
                other => self.expression(other, args),
            },
            Expression::Variant { reference, key } => match reference.as_ref() {
                Expression::TermReference { id, arguments } => {
                    self.term_variant(id, key, arguments, args)
                }
                other => self.expression(other, args),
            },
            Expression::Call { callee, arguments } => self.call(callee, arguments, args),
            Expression::Select { selector, variants } => {
                let selector = self.expression(selector, args);
                match select_variant(&selector, variants) {
                    Some(variant) => Resolved::Text(self.pattern(&variant.value, args)),
                    None => Resolved::Text(String::new()),
                }
            }
            Expression::Placeable(inner) => self.expression(inner, args),
        }
    }

    fn message(&mut self, id: &str, attribute: Option<&str>, args: &FormatArgs) -> Resolved {
        let index = self.index;
        let Some(entry) = index.lookup(id) else {
            self.errors.push(FormatError::UnknownMessage(id.to_string()));
            return Resolved::Text(format!("{{{id}}}"));
        };
        self.entry(entry, id, attribute, args)
    }

    fn term(
        &mut self,
        id: &str,
        attribute: Option<&str>,
        arguments: &Option<CallArguments>,
        args: &FormatArgs,
    ) -> Resolved {
        let key = format!("{TERM_PREFIX}{id}");
        let index = self.index;
        let Some(entry) = index.lookup(&key) else {
            self.errors.push(FormatError::UnknownTerm(id.to_string()));
            return Resolved::Text(format!("{{{key}}}"));
        };
        let term_args = self.term_arguments(arguments.as_ref(), args);
        self.entry(entry, &key, attribute, &term_args)
    }

    /// Legacy `-term[key]`: picks a branch of the term's top-level select.
    fn term_variant(
        &mut self,
        id: &str,
        key: &VariantKey,
        arguments: &Option<CallArguments>,
        args: &FormatArgs,
    ) -> Resolved {
        let index = self.index;
        let term_key = format!("{TERM_PREFIX}{id}");
        let Some(Entry::Term(term)) = index.lookup(&term_key) else {
            return self.term(id, None, arguments, args);
        };
        let [PatternElement::Placeable(Expression::Select { variants, .. })] =
            term.value.elements.as_slice()
        else {
            return self.term(id, None, arguments, args);
        };

        let variant = variants
            .iter()
            .find(|variant| variant.key.as_str() == key.as_str())
            .or_else(|| variants.iter().find(|variant| variant.default));
        let Some(variant) = variant else {
            return Resolved::Text(String::new());
        };

        let term_args = self.term_arguments(arguments.as_ref(), args);
        self.guarded(term_key, |scope| scope.pattern(&variant.value, &term_args))
    }

    fn entry(
        &mut self,
        entry: &Entry,
        key: &str,
        attribute: Option<&str>,
        args: &FormatArgs,
    ) -> Resolved {
        let pattern = match attribute {
            Some(name) => match entry.attribute(name) {
                Some(attr) => &attr.value,
                None => {
                    self.errors.push(FormatError::UnknownAttribute {
                        id: key.to_string(),
                        name: name.to_string(),
                    });
                    return Resolved::Text(format!("{{{key}.{name}}}"));
                }
            },
            None => match entry.value() {
                Some(value) => value,
                None => {
                    self.errors.push(FormatError::NoValue(key.to_string()));
                    return Resolved::Text(format!("{{{key}}}"));
                }
            },
        };

        self.guarded(active_key(key, attribute), |scope| {
            scope.pattern(pattern, args)
        })
    }

    /// Render through `render` unless `key` is already being rendered.
    fn guarded(&mut self, key: String, render: impl FnOnce(&mut Self) -> String) -> Resolved {
        if self.active.contains(&key) {
            self.errors.push(FormatError::Cyclic(key));
            return Resolved::Text("{???}".to_string());
        }
        self.active.push(key);
        let text = render(self);
        self.active.pop();
        Resolved::Text(text)
    }

    /// Terms only see the named arguments they are called with.
    fn term_arguments(
        &mut self,
        arguments: Option<&CallArguments>,
        args: &FormatArgs,
    ) -> FormatArgs {
        let Some(arguments) = arguments else {
            return FormatArgs::new();
        };
        arguments
            .named
            .iter()
            .map(|named| {
                let value = match self.expression(&named.value, args) {
                    Resolved::Text(text) => ArgValue::Text(text),
                    Resolved::Number(n) => ArgValue::Number(n),
                };
                (named.name.clone(), value)
            })
            .collect()
    }

    fn call(&mut self, callee: &str, arguments: &CallArguments, args: &FormatArgs) -> Resolved {
        match callee {
            "NUMBER" => match arguments.positional.first() {
                Some(first) => match self.expression(first, args) {
                    Resolved::Text(text) => match text.parse::<f64>() {
                        Ok(n) => Resolved::Number(n),
                        Err(_) => Resolved::Text(text),
                    },
                    number => number,
                },
                None => {
                    self.errors
                        .push(FormatError::MissingArgument(callee.to_string()));
                    Resolved::Text(format!("{{{callee}()}}"))
                }
            },
            _ => {
                self.errors
                    .push(FormatError::UnknownFunction(callee.to_string()));
                Resolved::Text(format!("{{{callee}()}}"))
            }
        }
    }
}

/// Exact key, then plural category for numbers, then the default variant.
fn select_variant<'v>(selector: &Resolved, variants: &'v [Variant]) -> Option<&'v Variant> {
    let exact = variants.iter().find(|variant| match (&variant.key, selector) {
        (VariantKey::Identifier(name), Resolved::Text(text)) => name == text,
        (VariantKey::Number(raw), Resolved::Text(text)) => raw == text,
        (VariantKey::Number(raw), Resolved::Number(n)) => raw.parse::<f64>().ok() == Some(*n),
        (VariantKey::Identifier(_), Resolved::Number(_)) => false,
    });
    if exact.is_some() {
        return exact;
    }

    if let Resolved::Number(n) = selector {
        let category = plural_category(*n);
        let by_category = variants.iter().find(|variant| match &variant.key {
            VariantKey::Identifier(name) => name == category,
            VariantKey::Number(_) => false,
        });
        if by_category.is_some() {
            return by_category;
        }
    }

    variants.iter().find(|variant| variant.default)
}
