//! Conversion errors.

use std::fmt;

use crate::block::BlockKind;

/// Kind of reference-style construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `![alt][id]` declaration.
    Image,
    /// `[^id]` marker.
    Footnote,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Image => "image",
            Self::Footnote => "footnote",
        })
    }
}

/// Error returned by [`try_to_html`](crate::try_to_html).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A block rule matched but removed nothing from the input.
    #[error("block rule `{rule}` made no progress at: {snippet}")]
    NoProgress { rule: BlockKind, snippet: String },
    /// A reference has no matching definition.
    #[error("{kind} reference `{label}` has no definition: {snippet}")]
    DanglingReference {
        kind: ReferenceKind,
        label: String,
        snippet: String,
    },
}

/// Longest snippet of source text kept in an error.
const SNIPPET_LEN: usize = 60;

/// First line of `text`, shortened for error messages.
pub(crate) fn snippet(text: &str) -> String {
    let line = text.lines().next().unwrap_or("");
    match line.char_indices().nth(SNIPPET_LEN) {
        Some((cut, _)) => format!("{}...", &line[..cut]),
        None => line.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_first_line_only() {
        assert_eq!(snippet("abc\ndef"), "abc");
    }

    #[test]
    fn test_snippet_truncates() {
        let long = "x".repeat(100);
        let s = snippet(&long);
        assert_eq!(s.len(), SNIPPET_LEN + 3);
        assert!(s.ends_with("..."));
    }

    #[test]
    fn test_error_messages() {
        let err = RenderError::DanglingReference {
            kind: ReferenceKind::Footnote,
            label: "x".into(),
            snippet: "see[^x]".into(),
        };
        assert_eq!(err.to_string(), "footnote reference `x` has no definition: see[^x]");

        let err = RenderError::NoProgress {
            rule: BlockKind::Footnote,
            snippet: "a".into(),
        };
        assert_eq!(err.to_string(), "block rule `footnote` made no progress at: a");
    }
}
