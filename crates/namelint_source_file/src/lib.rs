//! Line/column lookup for byte offsets in a source file.

use std::fmt;
use std::num::NonZeroUsize;

use namelint_text_size::{TextRange, TextSize};

/// A one-based line or column number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OneIndexed(NonZeroUsize);

impl OneIndexed {
    pub const MIN: Self = Self(NonZeroUsize::MIN);

    /// Converts a zero-based index.
    pub const fn from_zero_indexed(value: usize) -> Self {
        match NonZeroUsize::new(value.saturating_add(1)) {
            Some(v) => Self(v),
            None => Self::MIN,
        }
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }

    pub const fn to_zero_indexed(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Display for OneIndexed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A resolved `line:column` position. Columns count characters, not bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: OneIndexed,
    pub column: OneIndexed,
}

#[cfg(feature = "serde")]
impl serde::Serialize for SourceLocation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("SourceLocation", 2)?;
        state.serialize_field("line", &self.line.get())?;
        state.serialize_field("column", &self.column.get())?;
        state.end()
    }
}

/// Start offsets of every line in a text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "get-size", derive(get_size2::GetSize))]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    ascii: bool,
}

impl LineIndex {
    pub fn from_source_text(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = Vec::with_capacity(bytes.len() / 40 + 1);
        line_starts.push(TextSize::default());

        for pos in memchr::memchr_iter(b'\n', bytes) {
            // Offsets beyond u32 are rejected when the tree is built.
            if let Ok(next) = TextSize::try_from(pos + 1) {
                line_starts.push(next);
            }
        }

        Self {
            line_starts,
            ascii: text.is_ascii(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// The zero-based line that contains `offset`.
    fn line_of(&self, offset: TextSize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    pub fn line_start(&self, line: OneIndexed) -> Option<TextSize> {
        self.line_starts.get(line.to_zero_indexed()).copied()
    }

    pub fn source_location(&self, offset: TextSize, text: &str) -> SourceLocation {
        let line = self.line_of(offset);
        let line_start = self.line_starts[line];

        let column = if self.ascii {
            (offset - line_start).to_usize()
        } else {
            let end = offset.to_usize().min(text.len());
            text.get(line_start.to_usize()..end)
                .map_or(0, |prefix| prefix.chars().count())
        };

        SourceLocation {
            line: OneIndexed::from_zero_indexed(line),
            column: OneIndexed::from_zero_indexed(column),
        }
    }
}

/// A source text paired with its line index.
#[derive(Clone, Copy, Debug)]
pub struct SourceCode<'src, 'index> {
    text: &'src str,
    index: &'index LineIndex,
}

impl<'src, 'index> SourceCode<'src, 'index> {
    pub fn new(text: &'src str, index: &'index LineIndex) -> Self {
        Self { text, index }
    }

    pub fn line_column(&self, offset: TextSize) -> SourceLocation {
        self.index.source_location(offset, self.text)
    }

    pub fn slice(&self, range: TextRange) -> &'src str {
        &self.text[range]
    }

    pub fn text(&self) -> &'src str {
        self.text
    }

    /// The full text of the one-based `line`, without its terminator.
    pub fn line_text(&self, line: OneIndexed) -> &'src str {
        let Some(start) = self.index.line_start(line) else {
            return "";
        };
        let rest = &self.text[start.to_usize()..];
        rest.split_once('\n')
            .map_or(rest, |(line, _)| line.trim_end_matches('\r'))
    }
}
