//! Footnote markers, definitions, and per-conversion numbering.
//!
//! A marker `[^label]` inside a line refers to a definition line
//! `[^label]: text` somewhere later in the document. Numbers are assigned
//! in order of first use, starting at 1 for every conversion.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::Range;
use crate::cursor::{Line, LineCursor};
use crate::limits::MAX_LABEL_LEN;

/// Numbering state for one conversion.
#[derive(Debug)]
pub struct FootnoteStore {
    numbers: FxHashMap<String, usize>,
    next: usize,
}

impl Default for FootnoteStore {
    fn default() -> Self {
        Self {
            numbers: FxHashMap::default(),
            next: 1,
        }
    }
}

impl FootnoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number already assigned to a normalized label.
    pub fn number(&self, label: &str) -> Option<usize> {
        self.numbers.get(label).copied()
    }

    /// Number for a normalized label, assigning the next one on first use.
    /// The flag is true when the number was newly assigned.
    pub fn assign(&mut self, label: &str) -> (usize, bool) {
        if let Some(n) = self.number(label) {
            return (n, false);
        }
        let n = self.next;
        self.next += 1;
        self.numbers.insert(label.to_owned(), n);
        (n, true)
    }
}

/// Normalize a footnote label: lowercase ASCII.
/// Labels are restricted to `[a-zA-Z0-9_-]`.
pub fn normalize_footnote_label(label: &str) -> Option<String> {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return None;
    }
    if !label
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return None;
    }
    Some(label.to_ascii_lowercase())
}

/// A `[^label]` marker within a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootnoteMarker<'a> {
    /// Span of the whole marker within the line.
    pub range: Range,
    /// Label as written.
    pub label: &'a str,
    /// Normalized label.
    pub key: String,
}

/// Find all markers in a line. A definition line has no markers.
pub fn markers(line: &str) -> SmallVec<[FootnoteMarker<'_>; 2]> {
    let mut found = SmallVec::new();
    if parse_definition(line).is_some() {
        return found;
    }
    let mut pos = 0;
    while let Some(offset) = line[pos..].find("[^") {
        let start = pos + offset;
        let label_start = start + 2;
        let Some(close) = line[label_start..].find(']') else {
            break;
        };
        let label = &line[label_start..label_start + close];
        let end = label_start + close + 1;
        if let Some(key) = normalize_footnote_label(label) {
            found.push(FootnoteMarker {
                range: Range::from_usize(start, end),
                label,
                key,
            });
            pos = end;
        } else {
            pos = label_start;
        }
    }
    found
}

/// Parse a definition line `[^label]: text` into `(label, text)`.
pub fn parse_definition(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix("[^")?;
    let close = rest.find(']')?;
    let label = &rest[..close];
    normalize_footnote_label(label)?;
    let text = rest[close + 1..].strip_prefix(':')?;
    Some((label, text.trim()))
}

/// Find the first definition line for a normalized label at or after `from`.
pub fn find_definition<'a>(input: &'a str, from: usize, key: &str) -> Option<(Line<'a>, &'a str)> {
    LineCursor::new_at(input, from).find_map(|line| {
        let (label, text) = parse_definition(line.text)?;
        (normalize_footnote_label(label).as_deref() == Some(key)).then_some((line, text))
    })
}
