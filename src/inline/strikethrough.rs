//! Strikethrough: `~~text~~` becomes `<s>text</s>`.

use std::sync::LazyLock;

use regex::Regex;

use super::{Occurrences, substitute, wrap};
use crate::Range;

static STRIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~(.+?)~~").unwrap());

pub(super) fn apply(html: &str, tags: &[Range], occurrences: Occurrences) -> String {
    substitute(html, &STRIKE, tags, occurrences, |caps| wrap(caps, "s"))
}
