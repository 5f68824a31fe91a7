//! Inline links, inline images and bare URLs.

use std::sync::LazyLock;

use memchr::memmem;
use regex::{Captures, Regex};

use super::{Occurrences, substitute};
use crate::Range;
use crate::render::HtmlWriter;

/// `[text](url "title")`, or `![alt](url "title")` for an image.
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(!?)\[([^\]]*)\]\(([^\s()]+)(?:\s+"([^"]*)")?\s*\)"#).unwrap()
});

static BARE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"https?://[^\s<>"]+"#).unwrap());

/// Characters dropped from the end of a bare URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', '\''];

pub(super) fn inline_links(html: &str, tags: &[Range]) -> String {
    substitute(html, &LINK, tags, Occurrences::All, render_link)
}

fn render_link(caps: &Captures<'_>) -> Option<String> {
    let is_image = !caps.get(1)?.as_str().is_empty();
    let text = caps.get(2)?.as_str();
    let url = caps.get(3)?.as_str();
    let title = caps.get(4).map(|m| m.as_str());

    let mut writer = HtmlWriter::new();
    if is_image {
        writer.image(url, text, title);
    } else {
        writer.open_tag_start("a");
        writer.write_attr("href", url);
        if let Some(title) = title {
            writer.write_attr("title", title);
        }
        writer.open_tag_end();
        writer.write_str(if text.is_empty() { url } else { text });
        writer.close_tag("a");
    }
    Some(writer.into_string())
}

/// Turn bare `http(s)://` URLs into links. Text already inside an anchor is
/// left alone.
pub(super) fn autolinks(html: &str, tags: &[Range], occurrences: Occurrences) -> String {
    if memmem::find(html.as_bytes(), b"http").is_none() {
        return html.to_owned();
    }
    let mut protected = anchor_spans(html);
    protected.extend_from_slice(tags);
    substitute(html, &BARE_URL, &protected, occurrences, |caps| {
        let matched = caps.get(0)?.as_str();
        let url = matched.trim_end_matches(TRAILING_PUNCTUATION);
        let (_, rest) = url.split_once("://")?;
        if !rest.contains('.') || rest.ends_with('.') {
            return None;
        }
        let mut writer = HtmlWriter::new();
        writer.open_tag_start("a");
        writer.write_attr("href", url);
        writer.open_tag_end();
        writer.write_str(url);
        writer.close_tag("a");
        writer.write_str(&matched[url.len()..]);
        Some(writer.into_string())
    })
}

/// Spans from `<a ...>` through the matching `</a>`.
fn anchor_spans(html: &str) -> Vec<Range> {
    let bytes = html.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;
    while let Some(offset) = memmem::find(&bytes[pos..], b"<a") {
        let start = pos + offset;
        let opens_anchor = matches!(bytes.get(start + 2), Some(b' ' | b'>'));
        if !opens_anchor {
            pos = start + 2;
            continue;
        }
        let Some(close) = memmem::find(&bytes[start..], b"</a>") else {
            spans.push(Range::from_usize(start, html.len()));
            break;
        };
        let end = start + close + 4;
        spans.push(Range::from_usize(start, end));
        pos = end;
    }
    spans
}
