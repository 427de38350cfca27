//! Canonical FTL writer.

use super::ast::*;

const INDENT: &str = "    ";

/// Serialize a resource to FTL source. Junk is not written.
pub fn serialize(resource: &Resource) -> String {
    let mut out = String::new();
    for entry in &resource.body {
        serialize_entry(entry, &mut out);
    }
    out
}

pub fn serialize_entry(entry: &Entry, out: &mut String) {
    match entry {
        Entry::Message(message) => out.push_str(&message.id),
        Entry::Term(term) => {
            out.push(TERM_PREFIX);
            out.push_str(&term.id);
        }
    }
    out.push_str(" =");

    if let Some(value) = entry.value() {
        out.push_str(&serialize_value(value, 1));
    }
    for attribute in entry.attributes() {
        out.push('\n');
        out.push_str(INDENT);
        out.push('.');
        out.push_str(&attribute.id);
        out.push_str(" =");
        out.push_str(&serialize_value(&attribute.value, 2));
    }
    out.push('\n');
}

/// A pattern written after `=`: inline when it fits on one line, otherwise as
/// an indented block starting on the next line.
fn serialize_value(pattern: &Pattern, depth: usize) -> String {
    let body = serialize_pattern(pattern);
    if !body.contains('\n') {
        return format!(" {body}");
    }

    let indent = INDENT.repeat(depth);
    let mut out = String::new();
    for line in body.split('\n') {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(&indent);
            out.push_str(&escape_line_start(line));
        }
    }
    out
}

/// Block lines starting with `[`, `*` or `.` would be read as syntax.
fn escape_line_start(line: &str) -> String {
    match line.chars().next() {
        Some(c @ ('[' | '*' | '.')) => format!("{{ \"{c}\" }}{}", &line[1..]),
        _ => line.to_string(),
    }
}

pub fn serialize_pattern(pattern: &Pattern) -> String {
    let mut out = String::new();
    for element in &pattern.elements {
        match element {
            PatternElement::Text(text) => {
                for c in text.chars() {
                    match c {
                        '{' => out.push_str("{ \"{\" }"),
                        '}' => out.push_str("{ \"}\" }"),
                        _ => out.push(c),
                    }
                }
            }
            PatternElement::Placeable(expression) => out.push_str(&serialize_placeable(expression)),
        }
    }
    out
}

fn serialize_placeable(expression: &Expression) -> String {
    match expression {
        Expression::Select { selector, variants } => {
            let mut out = format!("{{ {} ->", serialize_expression(selector));
            for variant in variants {
                let marker = if variant.default { " *" } else { "  " };
                out.push('\n');
                out.push_str(marker);
                out.push('[');
                out.push_str(variant.key.as_str());
                out.push(']');
                out.push_str(&serialize_value(&variant.value, 2));
            }
            out.push_str("\n}");
            out
        }
        other => format!("{{ {} }}", serialize_expression(other)),
    }
}

pub fn serialize_expression(expression: &Expression) -> String {
    match expression {
        Expression::StringLiteral(value) => {
            format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
        }
        Expression::NumberLiteral(raw) => raw.clone(),
        Expression::VariableReference(name) => format!("${name}"),
        Expression::MessageReference(id) => id.clone(),
        Expression::TermReference { id, arguments } => {
            format!("{TERM_PREFIX}{id}{}", serialize_arguments(arguments.as_ref()))
        }
        Expression::Call { callee, arguments } => {
            format!("{callee}{}", serialize_arguments(Some(arguments)))
        }
        Expression::Attribute { reference, name } => match reference.as_ref() {
            Expression::TermReference { id, arguments } => format!(
                "{TERM_PREFIX}{id}.{name}{}",
                serialize_arguments(arguments.as_ref())
            ),
            other => format!("{}.{name}", serialize_expression(other)),
        },
        Expression::Variant { reference, key } => match reference.as_ref() {
            Expression::TermReference { id, arguments } => format!(
                "{TERM_PREFIX}{id}[{}]{}",
                key.as_str(),
                serialize_arguments(arguments.as_ref())
            ),
            other => format!("{}[{}]", serialize_expression(other), key.as_str()),
        },
        Expression::Placeable(inner) => serialize_placeable(inner),
        Expression::Select { .. } => serialize_placeable(expression),
    }
}

fn serialize_arguments(arguments: Option<&CallArguments>) -> String {
    let Some(arguments) = arguments else {
        return String::new();
    };
    let parts: Vec<String> = arguments
        .positional
        .iter()
        .map(serialize_expression)
        .chain(
            arguments
                .named
                .iter()
                .map(|arg| format!("{}: {}", arg.name, serialize_expression(&arg.value))),
        )
        .collect();
    format!("({})", parts.join(", "))
}
