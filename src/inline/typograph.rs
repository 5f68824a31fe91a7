//! Typographic replacements.

use std::sync::LazyLock;

use regex::Regex;

use super::{Occurrences, substitute};
use crate::Range;

static PUNCTUATION_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[!?.]{3,}").unwrap());
static SYMBOL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\((c|r|tm|p)\)").unwrap());

/// Keep the first three characters of any run of `!`, `?` and `.`.
pub(super) fn clamp_punctuation(html: &str, tags: &[Range]) -> String {
    substitute(html, &PUNCTUATION_RUN, tags, Occurrences::All, |caps| {
        let run = caps.get(0)?.as_str();
        // Run is ASCII so byte slicing is safe.
        (run.len() > 3).then(|| run[..3].to_owned())
    })
}

/// `(c)` ©, `(r)` ®, `(tm)` ™, `(p)` §, case-insensitive.
pub(super) fn symbols(html: &str, tags: &[Range]) -> String {
    substitute(html, &SYMBOL, tags, Occurrences::All, |caps| {
        let name = caps.get(1)?.as_str().to_ascii_lowercase();
        let symbol = match name.as_str() {
            "c" => "©",
            "r" => "®",
            "tm" => "™",
            "p" => "§",
            _ => return None,
        };
        Some(symbol.to_owned())
    })
}
