use core::fmt;

use crate::String;

/// A failing source line and the column range to underline.
///
/// Renders as two lines: the source line, then a marker with `^` under
/// `start_column` and `~` under every following column before `end_column`.
/// Columns are 0-based character offsets.
///
/// ```
/// use jsbridge_core::diagnostics::SourceMarker;
///
/// let marker = SourceMarker::new("let x = y;", 8, 9);
/// assert_eq!(marker.to_string(), "let x = y;\n        ^");
///
/// let marker = SourceMarker::new("let x = yyy;", 8, 11);
/// assert_eq!(marker.to_string(), "let x = yyy;\n        ^~~");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMarker {
    pub line: String,
    pub start_column: usize,
    pub end_column: usize,
}

impl SourceMarker {
    pub fn new(line: impl Into<String>, start_column: usize, end_column: usize) -> Self {
        Self {
            line: line.into(),
            start_column,
            end_column,
        }
    }

    /// Width of the marker line in columns: `end_column`, or one past
    /// `start_column` when the range is empty.
    pub fn width(&self) -> usize {
        self.end_column.max(self.start_column + 1)
    }

    /// Writes only the marker line.
    pub fn write_marker(&self, f: &mut impl fmt::Write) -> fmt::Result {
        // Tabs are copied so the caret lines up however the line is displayed.
        let mut chars = self.line.chars();
        for _ in 0..self.start_column {
            match chars.next() {
                Some('\t') => f.write_char('\t')?,
                _ => f.write_char(' ')?,
            }
        }
        f.write_char('^')?;
        for _ in self.start_column + 1..self.end_column {
            f.write_char('~')?;
        }
        Ok(())
    }
}

impl fmt::Display for SourceMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.line)?;
        self.write_marker(f)
    }
}
