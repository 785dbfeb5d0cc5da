//! Source text bookkeeping: byte-order mark, lines, offset/position mapping.

use lintel_syntax::Position;
use text_size::{TextRange, TextSize};

use crate::LocationError;

const BOM: char = '\u{feff}';
const SHEBANG_PREFIX: &str = "#!";

/// Returns `true` for `\n`, `\r`, U+2028 and U+2029.
#[inline]
pub(crate) fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Splits `text` into line content ranges.
///
/// `\r\n` counts as one terminator. Text ending in a terminator yields a
/// trailing empty line.
fn line_ranges(text: &str) -> Vec<TextRange> {
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if !is_line_terminator(c) {
            continue;
        }
        let mut terminator_end = offset + c.len_utf8();
        if c == '\r' && chars.next_if(|&(_, next)| next == '\n').is_some() {
            terminator_end += 1;
        }
        lines.push(range(line_start, offset));
        line_start = terminator_end;
    }
    lines.push(range(line_start, text.len()));

    lines
}

/// Splits `text` on every line terminator.
pub fn split_lines(text: &str) -> Vec<&str> {
    line_ranges(text).into_iter().map(|line| &text[line]).collect()
}

/// Returns the payload of a leading `#!` line, if it has one.
pub(crate) fn shebang(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(SHEBANG_PREFIX)?;
    let payload = rest.find(is_line_terminator).map_or(rest, |end| &rest[..end]);
    (!payload.is_empty()).then_some(payload)
}

fn range(start: usize, end: usize) -> TextRange {
    TextRange::new(size(start), size(end))
}

fn size(offset: usize) -> TextSize {
    TextSize::new(offset as u32)
}

/// Clamps `start..end` into `text` and widens it to char boundaries.
pub(crate) fn slice(text: &str, start: usize, end: usize) -> &str {
    let end = end.min(text.len());
    if start >= end {
        return "";
    }
    let start = (0..=start).rev().find(|&idx| text.is_char_boundary(idx)).unwrap_or(0);
    let end = (end..=text.len()).find(|&idx| text.is_char_boundary(idx)).unwrap_or(text.len());
    &text[start..end]
}

/// BOM-stripped text with its line table.
#[derive(Debug)]
pub(crate) struct TextModel {
    text: Box<str>,
    has_bom: bool,
    lines: Box<[TextRange]>,
}

impl TextModel {
    pub(crate) fn new(raw: &str) -> Self {
        let (has_bom, text) = match raw.strip_prefix(BOM) {
            Some(text) => (true, text),
            None => (false, raw),
        };
        let lines = line_ranges(text).into_boxed_slice();
        Self { text: text.into(), has_bom, lines }
    }

    #[inline]
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub(crate) fn has_bom(&self) -> bool {
        self.has_bom
    }

    pub(crate) fn lines(&self) -> impl ExactSizeIterator<Item = &str> + Clone {
        self.lines.iter().map(|&line| &self.text[line])
    }

    #[inline]
    pub(crate) fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_start(&self, index: usize) -> usize {
        self.lines[index].start().into()
    }

    /// Converts a byte offset into a 1-based line and 0-based column.
    pub(crate) fn loc_from_index(&self, index: usize) -> Result<Position, LocationError> {
        let len = self.text.len();
        if index > len {
            return Err(LocationError::IndexOutOfRange { index, len });
        }
        if index == len {
            let last = self.lines[self.lines.len() - 1];
            return Ok(Position::new(self.lines.len() as u32, u32::from(last.len())));
        }

        let line = self.lines.partition_point(|line| usize::from(line.start()) <= index);
        let column = index - self.line_start(line - 1);
        Ok(Position::new(line as u32, column as u32))
    }

    /// Converts a 1-based line and 0-based column into a byte offset.
    pub(crate) fn index_from_loc(&self, position: Position) -> Result<usize, LocationError> {
        let count = self.lines.len();
        let line = position.line as usize;
        if line == 0 || line > count {
            return Err(LocationError::LineOutOfRange { line: position.line, count });
        }

        let is_last = line == count;
        let line_start = self.line_start(line - 1);
        let line_end = if is_last {
            self.text.len()
        } else {
            self.line_start(line)
        };
        let index = line_start + position.column as usize;

        if (is_last && index > line_end) || (!is_last && index >= line_end) {
            return Err(LocationError::ColumnOutOfRange {
                line: position.line,
                column: position.column,
                len: line_end - line_start,
            });
        }

        Ok(index)
    }
}
