//! Reference definitions for reference-style images.
//!
//! A definition line looks like `[id]: url "optional title"`. Definitions
//! found while rendering are remembered per conversion so that several
//! declarations may share one definition.

use rustc_hash::FxHashMap;

use crate::cursor::{Line, LineCursor};
use crate::limits::MAX_LABEL_LEN;

/// A reference definition (URL + optional title).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRefDef {
    pub url: String,
    pub title: Option<String>,
}

impl LinkRefDef {
    pub fn new(url: impl Into<String>, title: Option<impl Into<String>>) -> Self {
        Self {
            url: url.into(),
            title: title.map(Into::into),
        }
    }
}

/// Store of reference definitions, keyed by normalized label.
#[derive(Debug, Default)]
pub struct LinkRefStore {
    by_label: FxHashMap<String, LinkRefDef>,
}

impl LinkRefStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition if the label is new. First definition wins.
    pub fn insert(&mut self, label: String, def: LinkRefDef) {
        self.by_label.entry(label).or_insert(def);
    }

    pub fn get(&self, label: &str) -> Option<&LinkRefDef> {
        self.by_label.get(label)
    }
}

/// A definition line split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDefinition<'a> {
    pub label: &'a str,
    pub url: &'a str,
    pub title: Option<&'a str>,
}

impl ParsedDefinition<'_> {
    pub fn to_def(&self) -> LinkRefDef {
        LinkRefDef::new(self.url, self.title)
    }
}

/// Normalize a label: collapse internal whitespace, trim, and case-fold.
pub fn normalize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for word in label.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out.to_lowercase()
}

/// Parse a definition line `[id]: url "title"`.
///
/// Footnote definitions (`[^id]: ...`) are not reference definitions.
pub fn parse_definition(line: &str) -> Option<ParsedDefinition<'_>> {
    let rest = line.trim_start().strip_prefix('[')?;
    if rest.starts_with('^') {
        return None;
    }
    let close = rest.find(']')?;
    let label = &rest[..close];
    if label.trim().is_empty() || label.len() > MAX_LABEL_LEN {
        return None;
    }

    let after = rest[close + 1..].strip_prefix(':')?.trim_start();
    let (url, after) = if let Some(bracketed) = after.strip_prefix('<') {
        let end = bracketed.find('>')?;
        (&bracketed[..end], &bracketed[end + 1..])
    } else {
        let end = after.find(char::is_whitespace).unwrap_or(after.len());
        (&after[..end], &after[end..])
    };
    if url.is_empty() {
        return None;
    }

    let title = parse_title(after.trim())?;
    Some(ParsedDefinition { label, url, title })
}

/// Parse the optional title part. `Some(None)` means no title; `None`
/// means trailing text that is not a title.
fn parse_title(text: &str) -> Option<Option<&str>> {
    if text.is_empty() {
        return Some(None);
    }
    let bytes = text.as_bytes();
    let (open, close) = (bytes[0], bytes[bytes.len() - 1]);
    let quoted = text.len() >= 2
        && matches!((open, close), (b'"', b'"') | (b'\'', b'\'') | (b'(', b')'));
    if quoted {
        Some(Some(&text[1..text.len() - 1]))
    } else {
        None
    }
}

/// Find the first definition line for `label` at or after byte `from`.
pub fn find_definition<'a>(
    input: &'a str,
    from: usize,
    label: &str,
) -> Option<(Line<'a>, ParsedDefinition<'a>)> {
    let wanted = normalize_label(label);
    LineCursor::new_at(input, from).find_map(|line| {
        let def = parse_definition(line.text)?;
        (normalize_label(def.label) == wanted).then_some((line, def))
    })
}
