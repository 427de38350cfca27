//! FTL syntax: AST, parser and serializer.
//!
//! - `ast`: the closed set of node types
//! - `parser`: lossy parser (malformed entries become junk)
//! - `serializer`: canonical FTL writer

pub mod ast;
mod parser;
mod serializer;

pub use ast::*;
pub use parser::parse;
pub use serializer::{serialize, serialize_entry, serialize_expression, serialize_pattern};

/// Build an index of line start byte offsets.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find the 1-based line number for a byte offset using binary search.
pub fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}
