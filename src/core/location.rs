/// Position in an FTL file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }

    /// Location of byte `offset` in `source`.
    pub fn from_offset(file_path: impl Into<String>, source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
        let line = source[..line_start].matches('\n').count() + 1;
        let col = source[line_start..offset].chars().count() + 1;
        Self::new(file_path, line, col)
    }
}

/// A location together with the text of its line, for caret display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

    /// Context for byte `offset` in `source`.
    pub fn at_offset(file_path: impl Into<String>, source: &str, offset: usize) -> Self {
        let location = SourceLocation::from_offset(file_path, source, offset);
        let source_line = source
            .lines()
            .nth(location.line - 1)
            .unwrap_or_default()
            .trim_end_matches('\r')
            .to_string();
        Self::new(location, source_line)
    }

    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}

/// A message definition: where it is, its id and its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub location: SourceLocation,
    pub key: String,
    pub value: String,
}

impl MessageContext {
    pub fn new(location: SourceLocation, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            location,
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}
