//! Inline formatting.
//!
//! A fixed, ordered sequence of substitution passes applied to a block's
//! rendered markup. Order matters: later passes see the output of earlier
//! ones. A pass never starts or ends a match inside an existing tag, so
//! attribute values are left alone.

mod code_span;
mod emphasis;
mod links;
mod marks;
mod strikethrough;
mod typograph;

use regex::{Captures, Regex};

use crate::Options;
use crate::Range;

/// One inline substitution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineRule {
    /// `**text**` / `__text__`
    Bold,
    /// `*text*` / `_text_`
    Italic,
    /// `` `code` ``
    CodeSpan,
    /// `[text](url "title")`, `![alt](url)`
    Link,
    /// Bare `http(s)://` URLs.
    Autolink,
    /// `~~text~~`
    Strikethrough,
    /// Runs of 3+ `!`, `?`, `.` collapse to 3.
    PunctuationClamp,
    /// `(c)`, `(r)`, `(tm)`, `(p)`
    Typograph,
    /// `^text^`
    Superscript,
    /// `~text~`
    Subscript,
    /// `++text++`
    Inserted,
    /// `==text==`
    Marked,
}

impl InlineRule {
    /// Passes in application order.
    pub const ORDER: [InlineRule; 12] = [
        InlineRule::Bold,
        InlineRule::Italic,
        InlineRule::CodeSpan,
        InlineRule::Link,
        InlineRule::Autolink,
        InlineRule::Strikethrough,
        InlineRule::PunctuationClamp,
        InlineRule::Typograph,
        InlineRule::Superscript,
        InlineRule::Subscript,
        InlineRule::Inserted,
        InlineRule::Marked,
    ];

    /// Apply this pass to `html`.
    pub fn apply(self, html: &str, occurrences: Occurrences) -> String {
        let tags = tag_spans(html);
        match self {
            Self::Bold => emphasis::strong(html, &tags),
            Self::Italic => emphasis::italic(html, &tags),
            Self::CodeSpan => code_span::apply(html, &tags),
            Self::Link => links::inline_links(html, &tags),
            Self::Autolink => links::autolinks(html, &tags, occurrences),
            Self::Strikethrough => strikethrough::apply(html, &tags, occurrences),
            Self::PunctuationClamp => typograph::clamp_punctuation(html, &tags),
            Self::Typograph => typograph::symbols(html, &tags),
            Self::Superscript => marks::superscript(html, &tags),
            Self::Subscript => marks::subscript(html, &tags),
            Self::Inserted => marks::inserted(html, &tags),
            Self::Marked => marks::marked(html, &tags),
        }
    }
}

/// How many matches a pass replaces per block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occurrences {
    #[default]
    All,
    First,
}

/// Runs every [`InlineRule`] in order.
///
/// # Example
/// ```
/// use mdhtml::{InlineFormatter, Options};
///
/// let formatter = InlineFormatter::new(&Options::default());
/// assert_eq!(formatter.format("<p>**bold** (c)</p>"), "<p><strong>bold</strong> ©</p>");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineFormatter {
    occurrences: Occurrences,
}

impl InlineFormatter {
    pub fn new(options: &Options) -> Self {
        let occurrences = if options.first_occurrence_only {
            Occurrences::First
        } else {
            Occurrences::All
        };
        Self { occurrences }
    }

    /// Format one rendered block.
    pub fn format(&self, markup: &str) -> String {
        InlineRule::ORDER
            .iter()
            .fold(markup.to_owned(), |html, rule| rule.apply(&html, self.occurrences))
    }
}

/// Spans of markup tags (`<p>`, `</a>`, `<img ... />`).
///
/// A `<` only starts a tag when followed by a letter, `/` or `!`.
pub(crate) fn tag_spans(html: &str) -> Vec<Range> {
    let bytes = html.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;
    while let Some(offset) = memchr::memchr(b'<', &bytes[pos..]) {
        let start = pos + offset;
        let starts_tag = bytes
            .get(start + 1)
            .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'/' || *b == b'!');
        if !starts_tag {
            pos = start + 1;
            continue;
        }
        let Some(close) = memchr::memchr(b'>', &bytes[start..]) else {
            break;
        };
        let end = start + close + 1;
        spans.push(Range::from_usize(start, end));
        pos = end;
    }
    spans
}

/// Replace matches of `re` in `html` outside `protected` spans.
///
/// `render` returns the replacement, or `None` to leave the match as-is.
pub(crate) fn substitute(
    html: &str,
    re: &Regex,
    protected: &[Range],
    occurrences: Occurrences,
    mut render: impl FnMut(&Captures<'_>) -> Option<String>,
) -> String {
    let mut out = String::with_capacity(html.len() + 32);
    let mut last = 0;
    let mut pos = 0;

    while pos <= html.len() {
        let Some(caps) = re.captures_at(html, pos) else {
            break;
        };
        let Some(m) = caps.get(0) else {
            break;
        };
        let (start, end) = (m.start(), m.end());

        if let Some(span) = protected.iter().find(|p| p.contains(start as u32)) {
            pos = span.end_usize().max(next_char(html, start));
            continue;
        }
        let ends_inside = protected
            .iter()
            .any(|p| p.start_usize() < end && end < p.end_usize());
        if ends_inside || start == end {
            pos = next_char(html, start);
            continue;
        }

        match render(&caps) {
            Some(replacement) => {
                out.push_str(&html[last..start]);
                out.push_str(&replacement);
                last = end;
                pos = end;
                if occurrences == Occurrences::First {
                    break;
                }
            }
            None => pos = next_char(html, start),
        }
    }

    out.push_str(&html[last..]);
    out
}

/// Wrap capture 1 in `<tag>`.
pub(crate) fn wrap(caps: &Captures<'_>, tag: &str) -> Option<String> {
    let inner = caps.get(1)?.as_str();
    Some(format!("<{tag}>{inner}</{tag}>"))
}

#[inline]
fn next_char(text: &str, pos: usize) -> usize {
    pos + text[pos..].chars().next().map_or(1, char::len_utf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn format(markup: &str) -> String {
        InlineFormatter::new(&Options::default()).format(markup)
    }

    #[test]
    fn test_tag_spans() {
        let spans = tag_spans("<p>a < b</p><img src=\"x\" />");
        let texts: Vec<_> = spans
            .iter()
            .map(|r| r.slice("<p>a < b</p><img src=\"x\" />"))
            .collect();
        assert_eq!(texts, ["<p>", "</p>", "<img src=\"x\" />"]);
    }

    #[test]
    fn test_attributes_are_not_rewritten() {
        let html = "<img src=\"a_b_c.png\" alt=\"x\" /> _y_";
        assert_eq!(format(html), "<img src=\"a_b_c.png\" alt=\"x\" /> <i>y</i>");
    }

    #[test]
    fn test_pipeline_order_bold_before_italic() {
        assert_eq!(format("<p>**a** *b*</p>"), "<p><strong>a</strong> <i>b</i></p>");
    }

    #[test]
    fn test_first_occurrence_only() {
        let options = Options {
            first_occurrence_only: true,
            ..Options::default()
        };
        let formatter = InlineFormatter::new(&options);
        let html = formatter.format("<p>~~a~~ and ~~b~~</p>");
        assert_eq!(html.matches("<s>").count(), 1);

        let all = format("<p>~~a~~ and ~~b~~</p>");
        assert_eq!(all, "<p><s>a</s> and <s>b</s></p>");
    }

    #[test]
    fn test_substitute_skips_declined_matches() {
        let re = Regex::new(r"x(\d)").unwrap();
        let out = substitute("x1 x2 x3", &re, &[], Occurrences::All, |caps| {
            let d = caps.get(1)?.as_str();
            (d != "2").then(|| format!("[{d}]"))
        });
        assert_eq!(out, "[1] x2 [3]");
    }

    #[test]
    fn test_order_has_every_rule_once() {
        let mut seen = std::collections::HashSet::new();
        for rule in InlineRule::ORDER {
            assert!(seen.insert(rule));
        }
        assert_eq!(seen.len(), 12);
    }
}
