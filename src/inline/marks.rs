//! Superscript, subscript, inserted and marked text.

use std::sync::LazyLock;

use regex::Regex;

use super::{Occurrences, substitute, wrap};
use crate::Range;

static SUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\^(.+?)\^").unwrap());
static SUB: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~(.+?)~").unwrap());
static INS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\+\+(.+?)\+\+").unwrap());
static MARK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"==(.+?)==").unwrap());

/// Class on the `<span>` produced for `==text==`.
pub const MARKED_CLASS: &str = "marked";

pub(super) fn superscript(html: &str, tags: &[Range]) -> String {
    substitute(html, &SUP, tags, Occurrences::All, |caps| wrap(caps, "sup"))
}

pub(super) fn subscript(html: &str, tags: &[Range]) -> String {
    substitute(html, &SUB, tags, Occurrences::All, |caps| wrap(caps, "sub"))
}

pub(super) fn inserted(html: &str, tags: &[Range]) -> String {
    substitute(html, &INS, tags, Occurrences::All, |caps| wrap(caps, "ins"))
}

pub(super) fn marked(html: &str, tags: &[Range]) -> String {
    substitute(html, &MARK, tags, Occurrences::All, |caps| {
        let inner = caps.get(1)?.as_str();
        Some(format!("<span class=\"{MARKED_CLASS}\">{inner}</span>"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::tag_spans;

    #[test]
    fn test_superscript_and_subscript() {
        assert_eq!(superscript("x^2^", &[]), "x<sup>2</sup>");
        assert_eq!(subscript("H~2~O", &[]), "H<sub>2</sub>O");
    }

    #[test]
    fn test_inserted() {
        assert_eq!(inserted("++new++ text", &[]), "<ins>new</ins> text");
        assert_eq!(inserted("a + b", &[]), "a + b");
    }

    #[test]
    fn test_marked() {
        assert_eq!(marked("==hot==", &[]), "<span class=\"marked\">hot</span>");
    }

    #[test]
    fn test_marked_skips_attribute_values() {
        let html = "<a href=\"?a==b==\">x</a>";
        assert_eq!(marked(html, &tag_spans(html)), html);
    }
}
