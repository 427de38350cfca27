//! Rewrites `select_<var>` shorthand in authoring JSON into FTL select
//! expressions.
//!
//! ```json
//! { "greeting": { "select_mood": { "happy": "Hi!", "sad": "Oh." } } }
//! ```
//!
//! becomes
//!
//! ```json
//! { "greeting": "{ $mood ->\n  [happy] Hi!\n  *[sad] Oh.\n}" }
//! ```

use serde_json::{Map, Value};

pub const SELECT_PREFIX: &str = "select_";

const BRANCH_INDENT: &str = "  ";

/// Replace every select shorthand in `node` with its rendered string.
///
/// Containers that are not shorthand keep their shape and key order. Nodes
/// that only look like shorthand (empty branch map, non-object branches,
/// siblings next to the `select_` key) are left as they are.
pub fn hoist_selects(node: &Value) -> Value {
    match node {
        Value::Array(items) => Value::Array(items.iter().map(hoist_selects).collect()),
        Value::Object(map) => {
            if let Some((variable, branches)) = as_select(map) {
                return Value::String(render_select(variable, branches));
            }
            Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), hoist_selects(value)))
                    .collect(),
            )
        }
        other => other.clone(),
    }
}

/// `Some((variable, branches))` when `map` is a well-formed select shorthand.
fn as_select(map: &Map<String, Value>) -> Option<(&str, &Map<String, Value>)> {
    if map.len() != 1 {
        return None;
    }
    let (key, value) = map.iter().next()?;
    let variable = key.strip_prefix(SELECT_PREFIX)?;
    if variable.is_empty() {
        return None;
    }
    match value {
        Value::Object(branches) if !branches.is_empty() => Some((variable, branches)),
        _ => None,
    }
}

fn render_select(variable: &str, branches: &Map<String, Value>) -> String {
    let mut lines = vec![format!("{{ ${variable} ->")];

    let last = branches.len() - 1;
    for (position, (key, value)) in branches.iter().enumerate() {
        let text = branch_text(&hoist_selects(value));
        lines.push(render_branch(key, &text, position == last));
    }

    lines.push("}".to_string());
    lines.join("\n")
}

fn branch_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}

/// `  [key] first line`, with later lines aligned under the first.
fn render_branch(key: &str, text: &str, is_default: bool) -> String {
    let marker = if is_default { "*" } else { "" };
    let header = format!("{BRANCH_INDENT}{marker}[{key}] ");
    let continuation = " ".repeat(header.chars().count());

    let mut lines = text.split('\n');
    let mut out = format!("{header}{}", lines.next().unwrap_or_default());
    for line in lines {
        out.push('\n');
        out.push_str(&continuation);
        out.push_str(line);
    }
    out
}
