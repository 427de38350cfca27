//! Flattens nested authoring JSON into FTL messages.
//!
//! `{ "screen": { "title": "Home" } }` becomes `screen_title = Home`. Run
//! [`hoist_selects`](super::hoist_selects) first so select shorthand is
//! already rendered as FTL text.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

/// `{ a.b.c }` inside a placeable: a message addressed by its JSON path.
static DOTTED_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(\s*)([A-Za-z][A-Za-z0-9_]*(?:\.[A-Za-z][A-Za-z0-9_]*)+)(\s*)\}")
        .expect("dotted reference pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FlatMessage {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlattenError {
    NotAnObject,
    ArrayValue { path: String },
    DuplicateKey { key: String, path: String },
}

impl fmt::Display for FlattenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlattenError::NotAnObject => write!(f, "top-level value must be an object"),
            FlattenError::ArrayValue { path } => {
                write!(f, "arrays are not supported (at '{path}')")
            }
            FlattenError::DuplicateKey { key, path } => {
                write!(f, "'{path}' flattens to '{key}', which is already defined")
            }
        }
    }
}

impl std::error::Error for FlattenError {}

/// Every scalar leaf of `root` as a message, in document order.
///
/// Numbers and booleans use their display text. `null` leaves are skipped.
pub fn flatten_messages(root: &Value) -> Result<Vec<FlatMessage>, FlattenError> {
    let Value::Object(map) = root else {
        return Err(FlattenError::NotAnObject);
    };

    let mut flattener = Flattener::default();
    for (key, value) in map {
        flattener.visit(&mut vec![key.as_str()], value)?;
    }
    Ok(flattener.messages)
}

/// FTL source for `messages`. Multi-line values continue on lines indented
/// by four spaces.
pub fn render_ftl(messages: &[FlatMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        out.push_str(&message.key);
        out.push_str(" =");
        let mut lines = message.value.split('\n');
        if let Some(first) = lines.next()
            && !first.is_empty()
        {
            out.push(' ');
            out.push_str(first);
        }
        for line in lines {
            out.push('\n');
            if !line.is_empty() {
                out.push_str("    ");
                out.push_str(line);
            }
        }
        out.push('\n');
    }
    out
}

/// Message key for a JSON path.
pub fn message_key<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(|segment| sanitize(segment.as_ref()))
        .collect::<Vec<_>>()
        .join("_")
}

/// Rewrite `{ a.b }` placeables to `{ a_b }`.
pub fn rewrite_dotted_references(text: &str) -> String {
    DOTTED_REFERENCE
        .replace_all(text, |caps: &Captures| {
            format!("{{{}{}{}}}", &caps[1], caps[2].replace('.', "_"), &caps[3])
        })
        .into_owned()
}

fn sanitize(segment: &str) -> String {
    segment
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[derive(Default)]
struct Flattener {
    messages: Vec<FlatMessage>,
    keys: HashSet<String>,
}

impl Flattener {
    fn visit<'v>(&mut self, path: &mut Vec<&'v str>, value: &'v Value) -> Result<(), FlattenError> {
        let text = match value {
            Value::Object(map) => {
                for (key, child) in map {
                    path.push(key);
                    self.visit(path, child)?;
                    path.pop();
                }
                return Ok(());
            }
            Value::Array(_) => {
                return Err(FlattenError::ArrayValue {
                    path: path.join("."),
                });
            }
            Value::Null => return Ok(()),
            Value::String(text) => rewrite_dotted_references(text),
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => number.to_string(),
        };

        let key = message_key(path.as_slice());
        if !self.keys.insert(key.clone()) {
            return Err(FlattenError::DuplicateKey {
                key,
                path: path.join("."),
            });
        }
        self.messages.push(FlatMessage { key, value: text });
        Ok(())
    }
}
