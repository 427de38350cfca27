//! Static analysis of the reference graph behind one entry.
//!
//! Starting from a root entry, the walker visits the value pattern and every
//! attribute pattern, following message and term references through the
//! [`EntryLookup`]. Each top-level call owns its own visited set, so cyclic
//! graphs terminate and independent calls never suppress each other.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::index::EntryLookup;
use super::syntax::{
    CallArguments, Entry, Expression, Pattern, PatternElement, TERM_PREFIX, Variant, VariantKey,
};

/// The CLDR plural category keywords.
pub const NUMERIC_CATEGORIES: [&str; 6] = ["zero", "one", "two", "few", "many", "other"];

/// Tag for variant keys that name a plural category rather than a string.
pub const NUMBER_LITERAL: &str = "number";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl NumericCategory {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "zero" => Some(Self::Zero),
            "one" => Some(Self::One),
            "two" => Some(Self::Two),
            "few" => Some(Self::Few),
            "many" => Some(Self::Many),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for NumericCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialized as `{"type": "number", "value": "<category>"}` so consumers can
/// tell it apart from a string variant with the same text.
impl Serialize for NumericCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("NumericCategory", 2)?;
        state.serialize_field("type", NUMBER_LITERAL)?;
        state.serialize_field("value", self.as_str())?;
        state.end()
    }
}

/// One possible value of a selector variable.
#[derive(Debug, Clone, PartialEq)]
pub enum VariantValue {
    Text(String),
    Number(f64),
    Category(NumericCategory),
}

/// Untagged. Whole numbers are written as JSON integers (`[5]`, not `[5.0]`).
impl Serialize for VariantValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            VariantValue::Text(text) => serializer.serialize_str(text),
            VariantValue::Number(n) if n.fract() == 0.0 && n.abs() < 2f64.powi(53) => {
                serializer.serialize_i64(*n as i64)
            }
            VariantValue::Number(n) => serializer.serialize_f64(*n),
            VariantValue::Category(category) => category.serialize(serializer),
        }
    }
}

impl VariantValue {
    fn from_key(key: &VariantKey) -> Self {
        match key {
            VariantKey::Number(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(VariantValue::Number)
                .unwrap_or_else(|| VariantValue::Text(raw.clone())),
            VariantKey::Identifier(name) => NumericCategory::from_keyword(name)
                .map(VariantValue::Category)
                .unwrap_or_else(|| VariantValue::Text(name.clone())),
        }
    }
}

impl fmt::Display for VariantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantValue::Text(text) => f.write_str(text),
            VariantValue::Number(n) => write!(f, "{n}"),
            VariantValue::Category(category) => write!(f, "{category}"),
        }
    }
}

/// A parameter that influences a message, with the selector values it takes.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ParamInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<VariantValue>>,
}

impl ParamInfo {
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: None,
        }
    }
}

/// Every parameter that can influence `root_key`, ordered by name.
///
/// Variants of a parameter selected in several places (including through
/// referenced messages and terms) are unioned in discovery order. References
/// to ids missing from the lookup are ignored. Unknown roots yield nothing.
pub fn collect_params<L: EntryLookup + ?Sized>(index: &L, root_key: &str) -> Vec<ParamInfo> {
    let Some(root) = index.lookup(root_key) else {
        return Vec::new();
    };

    let mut walker = GraphWalker::new(index, ParamCollector::default(), true);
    walker.walk_entry(root);

    walker
        .visitor
        .params
        .into_iter()
        .map(|(name, variants)| ParamInfo { name, variants })
        .collect()
}

/// Every message or term id referenced directly or transitively by
/// `root_key`, sorted and without the root itself.
///
/// Ids that are referenced but not defined are still reported.
pub fn collect_internal_references<L: EntryLookup + ?Sized>(
    index: &L,
    root_key: &str,
) -> Vec<String> {
    let Some(root) = index.lookup(root_key) else {
        return Vec::new();
    };

    let collector = ReferenceCollector {
        root_key,
        references: BTreeSet::new(),
    };
    let mut walker = GraphWalker::new(index, collector, true);
    walker.walk_entry(root);

    walker.visitor.references.into_iter().collect()
}

/// Ids referenced by `root_key` itself, sorted. References are not followed.
pub fn direct_references<L: EntryLookup + ?Sized>(index: &L, root_key: &str) -> Vec<String> {
    let Some(root) = index.lookup(root_key) else {
        return Vec::new();
    };

    let collector = ReferenceCollector {
        root_key,
        references: BTreeSet::new(),
    };
    let mut walker = GraphWalker::new(index, collector, false);
    walker.walk_entry(root);

    walker.visitor.references.into_iter().collect()
}

/// Raw keys of every variant selected on `$param` inside `root_key` itself,
/// sorted. References are not followed.
pub fn selector_values<L: EntryLookup + ?Sized>(
    index: &L,
    root_key: &str,
    param: &str,
) -> Vec<String> {
    let Some(root) = index.lookup(root_key) else {
        return Vec::new();
    };

    let collector = SelectorValueCollector {
        param,
        values: BTreeSet::new(),
    };
    let mut walker = GraphWalker::new(index, collector, false);
    walker.walk_entry(root);

    walker.visitor.values.into_iter().collect()
}

// ============================================================
// Walker
// ============================================================

/// Callbacks fired while walking the reference graph.
trait GraphVisitor {
    fn variable(&mut self, _name: &str) {}
    fn select(&mut self, _selector: &str, _variants: &[Variant]) {}
    /// `key` is an index key: `id` or `-id`.
    fn reference(&mut self, _key: &str) {}
}

struct GraphWalker<'a, L: ?Sized, V> {
    index: &'a L,
    visitor: V,
    follow_references: bool,
    /// Visited entries, by identity.
    seen: HashSet<*const Entry>,
}

impl<'a, L: EntryLookup + ?Sized, V: GraphVisitor> GraphWalker<'a, L, V> {
    fn new(index: &'a L, visitor: V, follow_references: bool) -> Self {
        Self {
            index,
            visitor,
            follow_references,
            seen: HashSet::new(),
        }
    }

    fn walk_entry(&mut self, entry: &Entry) {
        if !self.seen.insert(std::ptr::from_ref(entry)) {
            return;
        }

        if let Some(value) = entry.value() {
            self.walk_pattern(value);
        }
        for attribute in entry.attributes() {
            self.walk_pattern(&attribute.value);
        }
    }

    fn walk_pattern(&mut self, pattern: &Pattern) {
        for element in &pattern.elements {
            if let PatternElement::Placeable(expression) = element {
                self.visit_expression(expression);
            }
        }
    }

    fn visit_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::VariableReference(name) => self.visitor.variable(name),
            Expression::Select { selector, variants } => {
                if let Expression::VariableReference(name) = selector.as_ref() {
                    self.visitor.select(name, variants);
                }
                self.visit_expression(selector);
                for variant in variants {
                    self.walk_pattern(&variant.value);
                }
            }
            Expression::MessageReference(id) => self.follow(id),
            Expression::TermReference { id, arguments } => {
                self.follow(&format!("{TERM_PREFIX}{id}"));
                if let Some(arguments) = arguments {
                    self.visit_arguments(arguments);
                }
            }
            Expression::Call { arguments, .. } => self.visit_arguments(arguments),
            Expression::Attribute { reference, .. } | Expression::Variant { reference, .. } => {
                self.visit_expression(reference)
            }
            Expression::Placeable(inner) => self.visit_expression(inner),
            Expression::StringLiteral(_) | Expression::NumberLiteral(_) => {}
        }
    }

    fn visit_arguments(&mut self, arguments: &CallArguments) {
        for positional in &arguments.positional {
            self.visit_expression(positional);
        }
        for named in &arguments.named {
            self.visit_expression(&named.value);
        }
    }

    fn follow(&mut self, key: &str) {
        self.visitor.reference(key);
        if !self.follow_references {
            return;
        }
        let index = self.index;
        if let Some(entry) = index.lookup(key) {
            self.walk_entry(entry);
        }
    }
}

// ============================================================
// Visitors
// ============================================================

#[derive(Default)]
struct ParamCollector {
    params: BTreeMap<String, Option<Vec<VariantValue>>>,
}

impl GraphVisitor for ParamCollector {
    fn variable(&mut self, name: &str) {
        self.params.entry(name.to_string()).or_insert(None);
    }

    fn select(&mut self, selector: &str, variants: &[Variant]) {
        let known = self
            .params
            .entry(selector.to_string())
            .or_insert(None)
            .get_or_insert_with(Vec::new);

        for variant in variants {
            let value = VariantValue::from_key(&variant.key);
            if !known.contains(&value) {
                known.push(value);
            }
        }
    }
}

struct ReferenceCollector<'k> {
    root_key: &'k str,
    references: BTreeSet<String>,
}

impl GraphVisitor for ReferenceCollector<'_> {
    fn reference(&mut self, key: &str) {
        if key != self.root_key {
            self.references.insert(key.to_string());
        }
    }
}

struct SelectorValueCollector<'p> {
    param: &'p str,
    values: BTreeSet<String>,
}

impl GraphVisitor for SelectorValueCollector<'_> {
    fn select(&mut self, selector: &str, variants: &[Variant]) {
        if selector == self.param {
            self.values
                .extend(variants.iter().map(|variant| variant.key.as_str().to_string()));
        }
    }
}
