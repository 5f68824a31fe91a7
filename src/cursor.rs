//! Line-oriented cursor over the remaining input.
//!
//! Every block rule looks at the input one line at a time, so the cursor
//! hands out lines together with their byte offsets. Newline search uses
//! `memchr`.

use memchr::memchr;

use crate::Range;

/// One line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Line text without its trailing newline.
    pub text: &'a str,
    /// Span of `text` in the input.
    pub content: Range,
    /// Span of the line including its trailing newline (if any).
    pub full: Range,
}

impl<'a> Line<'a> {
    /// True if the line has no non-whitespace characters.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A cursor that yields lines in order.
///
/// # Example
/// ```
/// use mdhtml::cursor::LineCursor;
///
/// let mut cursor = LineCursor::new("a\nb");
/// assert_eq!(cursor.next_line().map(|l| l.text), Some("a"));
/// assert_eq!(cursor.next_line().map(|l| l.text), Some("b"));
/// assert!(cursor.is_eof());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct LineCursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    /// Create a cursor at the start of `input`.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Create a cursor starting at a byte offset (must be a line start).
    #[inline]
    pub fn new_at(input: &'a str, offset: usize) -> Self {
        debug_assert!(offset <= input.len());
        Self { input, pos: offset }
    }

    /// Current byte offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Check if the cursor is at end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Return the line at the cursor without advancing.
    pub fn peek_line(&self) -> Option<Line<'a>> {
        if self.is_eof() {
            return None;
        }
        let rest = &self.input.as_bytes()[self.pos..];
        let (content_end, full_end) = match memchr(b'\n', rest) {
            Some(i) => (self.pos + i, self.pos + i + 1),
            None => (self.input.len(), self.input.len()),
        };
        Some(Line {
            text: &self.input[self.pos..content_end],
            content: Range::from_usize(self.pos, content_end),
            full: Range::from_usize(self.pos, full_end),
        })
    }

    /// Return the line at the cursor and advance past it.
    #[inline]
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        let line = self.peek_line()?;
        self.pos = line.full.end_usize();
        Some(line)
    }

    /// Skip blank lines, returning the number skipped.
    pub fn skip_blank_lines(&mut self) -> usize {
        let mut skipped = 0;
        while let Some(line) = self.peek_line() {
            if !line.is_blank() {
                break;
            }
            self.pos = line.full.end_usize();
            skipped += 1;
        }
        skipped
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = Line<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}

/// Collect a group of lines that all satisfy `matches`, starting at the
/// first line of `input`.
///
/// Blank lines between two matching lines belong to the group; trailing
/// blank lines do not. Returns the matching lines and the span covering
/// the whole group (including the newline of its last line).
pub fn collect_group<'a>(
    input: &'a str,
    mut matches: impl FnMut(&str) -> bool,
) -> Option<(Vec<Line<'a>>, Range)> {
    let mut cursor = LineCursor::new(input);
    let mut lines = Vec::new();
    let mut end = 0usize;

    loop {
        let mut ahead = cursor;
        ahead.skip_blank_lines();
        let Some(line) = ahead.peek_line() else {
            break;
        };
        if !matches(line.text) {
            break;
        }
        ahead.next_line();
        end = line.full.end_usize();
        lines.push(line);
        cursor = ahead;
    }

    if lines.is_empty() {
        None
    } else {
        Some((lines, Range::from_usize(0, end)))
    }
}

/// Count leading indentation columns; a tab counts as two columns.
pub fn indent_width(text: &str) -> usize {
    text.bytes()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .map(|b| if b == b'\t' { 2 } else { 1 })
        .sum()
}
