//! Strong and regular emphasis.
//!
//! Either `*` or `_` may open or close, and the two do not need to match.
//! Strong runs first so `**x**` is never read as two nested emphasis spans.

use std::sync::LazyLock;

use regex::Regex;

use super::{Occurrences, substitute, wrap};
use crate::Range;

static STRONG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_]{2}(.+?)[*_]{2}").unwrap());

/// The first character after the opener must not be whitespace, which keeps
/// `a * b * c` literal.
static EM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_](\S.*?)[*_]").unwrap());

pub(super) fn strong(html: &str, tags: &[Range]) -> String {
    substitute(html, &STRONG, tags, Occurrences::All, |caps| wrap(caps, "strong"))
}

pub(super) fn italic(html: &str, tags: &[Range]) -> String {
    substitute(html, &EM, tags, Occurrences::All, |caps| wrap(caps, "i"))
}
