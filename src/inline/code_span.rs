//! Code spans: `` `code` `` becomes `<code>code</code>`.
//!
//! Runs after emphasis, so emphasis markers inside backticks have already
//! been rewritten by the time this pass sees them.

use std::sync::LazyLock;

use regex::Regex;

use super::{Occurrences, substitute, wrap};
use crate::Range;

static CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.+?)`").unwrap());

pub(super) fn apply(html: &str, tags: &[Range]) -> String {
    substitute(html, &CODE_SPAN, tags, Occurrences::All, |caps| wrap(caps, "code"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::tag_spans;

    #[test]
    fn test_code_span() {
        let html = "<p>run `cargo` now</p>";
        assert_eq!(apply(html, &tag_spans(html)), "<p>run <code>cargo</code> now</p>");
    }

    #[test]
    fn test_empty_backticks_stay() {
        assert_eq!(apply("``", &[]), "``");
    }
}
