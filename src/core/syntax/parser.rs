//! Recursive-descent FTL parser.
//!
//! The parser never fails as a whole: an entry that cannot be read is recorded
//! as [`Junk`] and parsing resumes at the next line that can start an entry.

use super::ast::*;

/// Parse FTL source text into a [`Resource`].
///
/// Malformed entries are left out of `body` and reported in `junk`.
pub fn parse(source: &str) -> Resource {
    Parser::new(source).resource()
}

#[derive(Debug, Clone)]
struct ParseError {
    message: String,
    pos: usize,
}

type ParseResult<T> = std::result::Result<T, ParseError>;

/// Deepest nesting of placeables and call arguments accepted in one entry.
const MAX_NESTING: usize = 64;

/// A piece of a pattern before dedenting.
enum Piece {
    Text(String),
    /// Leading spaces of a continuation line.
    Indent(usize),
    Placeable(Expression),
}

struct Parser<'s> {
    src: &'s str,
    bytes: &'s [u8],
    pos: usize,
    depth: usize,
}

impl<'s> Parser<'s> {
    fn new(src: &'s str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    fn resource(mut self) -> Resource {
        let mut resource = Resource::default();

        loop {
            self.skip_blank_lines();
            let start = self.pos;
            match self.peek() {
                None => break,
                Some(b'#') => self.skip_to_next_line(),
                Some(c) if c.is_ascii_alphabetic() || c == b'-' => match self.entry(start) {
                    Ok(entry) => resource.body.push(entry),
                    Err(err) => resource.junk.push(self.recover(start, err)),
                },
                Some(_) => {
                    let err = self.error_at("expected a message, term or comment", start);
                    resource.junk.push(self.recover(start, err));
                }
            }
        }

        resource
    }

    // ============================================================
    // Entries
    // ============================================================

    fn entry(&mut self, start: usize) -> ParseResult<Entry> {
        let is_term = self.eat(b'-');
        let id = self.identifier()?;

        self.skip_blank_inline();
        self.expect(b'=')?;

        let value = self.pattern()?;
        let attributes = self.attributes()?;
        self.ensure_entry_end()?;

        let span = start..self.pos;
        if is_term {
            let value = value.ok_or_else(|| self.error_at("expected a value for term", start))?;
            Ok(Entry::Term(Term {
                id,
                value,
                attributes,
                span,
            }))
        } else {
            if value.is_none() && attributes.is_empty() {
                return Err(self.error_at("expected a value or attributes for message", start));
            }
            Ok(Entry::Message(Message {
                id,
                value,
                attributes,
                span,
            }))
        }
    }

    fn attributes(&mut self) -> ParseResult<Vec<Attribute>> {
        let mut attributes = Vec::new();
        loop {
            let save = self.pos;
            if !self.skip_line_end() {
                break;
            }
            self.skip_blank_lines();
            self.skip_blank_inline();
            if !self.eat(b'.') {
                self.pos = save;
                break;
            }

            let id = self.identifier()?;
            self.skip_blank_inline();
            self.expect(b'=')?;
            let value = self
                .pattern()?
                .ok_or_else(|| self.error("expected a value for attribute"))?;
            attributes.push(Attribute { id, value });
        }
        Ok(attributes)
    }

    /// After an entry only a line end, blank lines, or the next entry may follow.
    fn ensure_entry_end(&mut self) -> ParseResult<()> {
        self.skip_blank_inline();
        if self.is_eof() {
            return Ok(());
        }
        if !self.skip_line_end() {
            return Err(self.error("expected a line end"));
        }

        let save = self.pos;
        self.skip_blank_lines();
        let stray = matches!(self.peek(), Some(b' '));
        self.pos = save;
        if stray {
            return Err(self.error("unexpected indented content after entry"));
        }
        Ok(())
    }

    /// Skip from the start of a broken entry to the next line that can begin one.
    fn recover(&mut self, start: usize, err: ParseError) -> Junk {
        self.pos = start;
        self.skip_to_next_line();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphabetic() || c == b'-' || c == b'#' {
                break;
            }
            self.skip_to_next_line();
        }

        Junk {
            content: self.src[start..self.pos].to_string(),
            annotation: err.message,
            span: start..self.pos,
        }
    }

    // ============================================================
    // Patterns
    // ============================================================

    fn pattern(&mut self) -> ParseResult<Option<Pattern>> {
        self.skip_blank_inline();
        let mut pieces = Vec::new();

        loop {
            match self.peek() {
                None => break,
                Some(b'{') => {
                    let expression = self.placeable()?;
                    pieces.push(Piece::Placeable(expression));
                }
                Some(b'}') => return Err(self.error("unbalanced closing brace in text")),
                Some(_) if self.at_line_end() => {
                    let save = self.pos;
                    let mut newlines = 0;
                    while self.skip_line_end() {
                        newlines += 1;
                        let line_start = self.pos;
                        self.skip_blank_inline();
                        if !self.at_line_end() {
                            self.pos = line_start;
                            break;
                        }
                    }

                    let indent = self.count_indent();
                    let continues = indent > 0
                        && !matches!(
                            self.bytes.get(self.pos + indent),
                            None | Some(b'[' | b'*' | b'.' | b'}')
                        );
                    if !continues {
                        self.pos = save;
                        break;
                    }

                    if !pieces.is_empty() {
                        pieces.push(Piece::Text("\n".repeat(newlines)));
                    }
                    pieces.push(Piece::Indent(indent));
                    self.pos += indent;
                }
                Some(_) => {
                    let text = self.text_run();
                    pieces.push(Piece::Text(text));
                }
            }
        }

        Ok(finish_pattern(pieces))
    }

    fn text_run(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == b'{' || c == b'}' || self.at_line_end() {
                break;
            }
            self.pos += 1;
        }
        self.src[start..self.pos].to_string()
    }

    // ============================================================
    // Expressions
    // ============================================================

    fn placeable(&mut self) -> ParseResult<Expression> {
        self.expect(b'{')?;
        self.skip_blank();
        let expression = self.expression()?;
        self.skip_blank();
        self.expect(b'}')?;
        Ok(expression)
    }

    fn expression(&mut self) -> ParseResult<Expression> {
        let start = self.pos;
        let selector = self.inline_expression()?;
        self.skip_blank();

        if !self.starts_with("->") {
            return Ok(selector);
        }

        match &selector {
            Expression::MessageReference(_) => {
                return Err(self.error_at("message references cannot be used as selectors", start));
            }
            Expression::Attribute { reference, .. }
                if matches!(**reference, Expression::MessageReference(_)) =>
            {
                return Err(self.error_at("message attributes cannot be used as selectors", start));
            }
            Expression::TermReference { .. } => {
                return Err(self.error_at("terms cannot be used as selectors", start));
            }
            Expression::Placeable(_) => {
                return Err(self.error_at("placeables cannot be used as selectors", start));
            }
            _ => {}
        }

        self.pos += 2;
        self.skip_blank_inline();
        let variants = self.variants()?;
        Ok(Expression::Select {
            selector: Box::new(selector),
            variants,
        })
    }

    fn variants(&mut self) -> ParseResult<Vec<Variant>> {
        let mut variants = Vec::new();
        let mut has_default = false;

        loop {
            self.skip_blank();
            let default = self.eat(b'*');
            if self.peek() != Some(b'[') {
                if default {
                    return Err(self.error("expected '[' after '*'"));
                }
                break;
            }
            if default && has_default {
                return Err(self.error("a select expression can only have one default variant"));
            }

            self.pos += 1;
            self.skip_blank();
            let key = self.variant_key()?;
            self.skip_blank();
            self.expect(b']')?;

            let value = self
                .pattern()?
                .ok_or_else(|| self.error("expected a value for variant"))?;
            has_default |= default;
            variants.push(Variant {
                key,
                value,
                default,
            });
        }

        if variants.is_empty() {
            return Err(self.error("expected at least one variant"));
        }
        if !has_default {
            return Err(self.error("expected a default variant"));
        }
        Ok(variants)
    }

    fn variant_key(&mut self) -> ParseResult<VariantKey> {
        match self.peek() {
            Some(c) if c.is_ascii_digit() || c == b'-' => Ok(VariantKey::Number(self.number()?)),
            _ => Ok(VariantKey::Identifier(self.identifier()?)),
        }
    }

    fn inline_expression(&mut self) -> ParseResult<Expression> {
        if self.depth >= MAX_NESTING {
            return Err(self.error("expressions are nested too deeply"));
        }
        self.depth += 1;
        let expression = self.nested_inline_expression();
        self.depth -= 1;
        expression
    }

    fn nested_inline_expression(&mut self) -> ParseResult<Expression> {
        match self.peek() {
            Some(b'"') => Ok(Expression::StringLiteral(self.string_literal()?)),
            Some(c) if c.is_ascii_digit() => Ok(Expression::NumberLiteral(self.number()?)),
            Some(b'-') if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                Ok(Expression::NumberLiteral(self.number()?))
            }
            Some(b'-') => {
                self.pos += 1;
                self.term_reference()
            }
            Some(b'$') => {
                self.pos += 1;
                Ok(Expression::VariableReference(self.identifier()?))
            }
            Some(b'{') => Ok(Expression::Placeable(Box::new(self.placeable()?))),
            Some(c) if c.is_ascii_alphabetic() => {
                let start = self.pos;
                let id = self.identifier()?;

                if let Some(arguments) = self.maybe_call_arguments()? {
                    if !is_function_name(&id) {
                        return Err(self.error_at(
                            format!("function names must be upper case: {id}"),
                            start,
                        ));
                    }
                    return Ok(Expression::Call {
                        callee: id,
                        arguments,
                    });
                }

                let reference = Expression::MessageReference(id);
                if self.eat(b'.') {
                    let name = self.identifier()?;
                    return Ok(Expression::Attribute {
                        reference: Box::new(reference),
                        name,
                    });
                }
                Ok(reference)
            }
            _ => Err(self.error("expected an inline expression")),
        }
    }

    /// Parses the part of a term reference after the leading `-`.
    fn term_reference(&mut self) -> ParseResult<Expression> {
        let id = self.identifier()?;

        let attribute = if self.eat(b'.') {
            Some(self.identifier()?)
        } else {
            None
        };

        let legacy_key = if attribute.is_none() && self.peek() == Some(b'[') {
            self.pos += 1;
            self.skip_blank();
            let key = self.variant_key()?;
            self.skip_blank();
            self.expect(b']')?;
            Some(key)
        } else {
            None
        };

        let arguments = self.maybe_call_arguments()?;
        let reference = Box::new(Expression::TermReference { id, arguments });

        Ok(match (attribute, legacy_key) {
            (Some(name), _) => Expression::Attribute { reference, name },
            (None, Some(key)) => Expression::Variant { reference, key },
            (None, None) => *reference,
        })
    }

    fn maybe_call_arguments(&mut self) -> ParseResult<Option<CallArguments>> {
        let save = self.pos;
        self.skip_blank();
        if self.peek() != Some(b'(') {
            self.pos = save;
            return Ok(None);
        }
        self.call_arguments().map(Some)
    }

    fn call_arguments(&mut self) -> ParseResult<CallArguments> {
        self.expect(b'(')?;
        let mut arguments = CallArguments::default();

        loop {
            self.skip_blank();
            if self.eat(b')') {
                break;
            }

            let start = self.pos;
            let expression = self.inline_expression()?;
            self.skip_blank();

            if self.eat(b':') {
                let Expression::MessageReference(name) = expression else {
                    return Err(self.error_at("named argument names must be identifiers", start));
                };
                if arguments.named.iter().any(|arg| arg.name == name) {
                    return Err(self.error_at(format!("duplicate named argument: {name}"), start));
                }
                self.skip_blank();
                let value = match self.peek() {
                    Some(b'"') => Expression::StringLiteral(self.string_literal()?),
                    Some(c) if c.is_ascii_digit() || c == b'-' => {
                        Expression::NumberLiteral(self.number()?)
                    }
                    _ => return Err(self.error("named arguments only accept literals")),
                };
                arguments.named.push(NamedArgument { name, value });
            } else {
                if !arguments.named.is_empty() {
                    return Err(self.error_at(
                        "positional arguments must come before named arguments",
                        start,
                    ));
                }
                arguments.positional.push(expression);
            }

            self.skip_blank();
            if !self.eat(b',') && self.peek() != Some(b')') {
                return Err(self.error("expected ',' or ')' in call arguments"));
            }
        }

        Ok(arguments)
    }

    // ============================================================
    // Tokens
    // ============================================================

    fn identifier(&mut self) -> ParseResult<String> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() => self.pos += 1,
            _ => return Err(self.error("expected an identifier")),
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'_' || c == b'-' {
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn number(&mut self) -> ParseResult<String> {
        let start = self.pos;
        self.eat(b'-');
        if !self.eat_digits() {
            return Err(self.error_at("expected a number", start));
        }
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
            self.eat_digits();
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn eat_digits(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn string_literal(&mut self) -> ParseResult<String> {
        let start = self.pos;
        self.expect(b'"')?;
        let mut value = String::new();

        loop {
            let rest = &self.src[self.pos..];
            let Some(c) = rest.chars().next() else {
                return Err(self.error_at("unterminated string literal", start));
            };
            match c {
                '"' => {
                    self.pos += 1;
                    return Ok(value);
                }
                '\n' | '\r' => return Err(self.error_at("unterminated string literal", start)),
                '\\' => {
                    self.pos += 1;
                    value.push(self.escape_sequence()?);
                }
                _ => {
                    value.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
    }

    fn escape_sequence(&mut self) -> ParseResult<char> {
        let (digits, c) = match self.peek() {
            Some(b'\\') => (0, '\\'),
            Some(b'"') => (0, '"'),
            Some(b'u') => (4, 'u'),
            Some(b'U') => (6, 'U'),
            _ => return Err(self.error("unknown escape sequence")),
        };
        self.pos += 1;
        if digits == 0 {
            return Ok(c);
        }

        let hex = self
            .src
            .get(self.pos..self.pos + digits)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| self.error("invalid unicode escape sequence"))?;
        let code = u32::from_str_radix(hex, 16)
            .map_err(|_| self.error("invalid unicode escape"))?;
        self.pos += digits;
        Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    // ============================================================
    // Cursor helpers
    // ============================================================

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> ParseResult<()> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", byte as char)))
        }
    }

    fn starts_with(&self, token: &str) -> bool {
        self.src[self.pos..].starts_with(token)
    }

    fn at_line_end(&self) -> bool {
        match self.peek() {
            Some(b'\n') => true,
            Some(b'\r') => self.peek_at(1) == Some(b'\n'),
            _ => false,
        }
    }

    fn skip_line_end(&mut self) -> bool {
        match self.peek() {
            Some(b'\n') => {
                self.pos += 1;
                true
            }
            Some(b'\r') if self.peek_at(1) == Some(b'\n') => {
                self.pos += 2;
                true
            }
            _ => false,
        }
    }

    fn skip_blank_inline(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    /// Spaces and line ends.
    fn skip_blank(&mut self) {
        loop {
            self.skip_blank_inline();
            if !self.skip_line_end() {
                break;
            }
        }
    }

    /// Skip lines made only of spaces, stopping at the start of the first other line.
    fn skip_blank_lines(&mut self) {
        loop {
            let line_start = self.pos;
            self.skip_blank_inline();
            if self.is_eof() {
                return;
            }
            if !self.skip_line_end() {
                self.pos = line_start;
                return;
            }
        }
    }

    fn skip_to_next_line(&mut self) {
        while !self.is_eof() && !self.at_line_end() {
            self.pos += 1;
        }
        self.skip_line_end();
    }

    fn count_indent(&self) -> usize {
        self.bytes[self.pos..]
            .iter()
            .take_while(|&&c| c == b' ')
            .count()
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        self.error_at(message, self.pos)
    }

    fn error_at(&self, message: impl Into<String>, pos: usize) -> ParseError {
        ParseError {
            message: message.into(),
            pos,
        }
    }
}

fn is_function_name(id: &str) -> bool {
    id.bytes()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == b'_' || c == b'-')
}

/// Dedent continuation lines by their common indent and join adjacent text.
fn finish_pattern(pieces: Vec<Piece>) -> Option<Pattern> {
    let common_indent = pieces
        .iter()
        .filter_map(|piece| match piece {
            Piece::Indent(width) => Some(*width),
            _ => None,
        })
        .min()
        .unwrap_or(0);

    let mut elements: Vec<PatternElement> = Vec::new();
    for piece in pieces {
        let text = match piece {
            Piece::Placeable(expression) => {
                elements.push(PatternElement::Placeable(expression));
                continue;
            }
            Piece::Text(text) => text,
            Piece::Indent(width) => " ".repeat(width - common_indent),
        };
        if text.is_empty() {
            continue;
        }
        match elements.last_mut() {
            Some(PatternElement::Text(prev)) => prev.push_str(&text),
            _ => elements.push(PatternElement::Text(text)),
        }
    }

    if let Some(PatternElement::Text(last)) = elements.last_mut() {
        let trimmed = last.trim_end_matches([' ', '\n', '\r']).len();
        last.truncate(trimmed);
        if last.is_empty() {
            elements.pop();
        }
    }

    if elements.is_empty() {
        None
    } else {
        Some(Pattern { elements })
    }
}
