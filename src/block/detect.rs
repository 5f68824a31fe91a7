//! Detectors for each block rule.
//!
//! Every detector looks at the first line of the remaining input (and,
//! for multi-line rules, the lines after it). A successful match always
//! consumes a non-empty prefix of the first line.

use smallvec::SmallVec;

use crate::Range;
use crate::cursor::{Line, LineCursor, collect_group, indent_width};
use crate::document::RenderContext;
use crate::error::ReferenceKind;
use crate::footnote;
use crate::limits::{MAX_HEADING_LEVEL, MAX_LIST_MARKER_DIGITS};
use crate::link_ref;
use crate::nested::NestedItem;
use crate::table::{self, TableSpec};

use super::model::{Block, FootnoteRef, MatchSpan};

/// First line of the remaining input.
#[inline]
fn first_line(src: &str) -> Option<Line<'_>> {
    LineCursor::new(src).peek_line()
}

/// Range of a prefix of `line` ending at byte `len` of its text. When only
/// whitespace follows, the whole line (with newline) is consumed.
fn prefix_range(line: &Line<'_>, len: usize) -> Range {
    if line.text[len..].trim().is_empty() {
        line.full
    } else {
        Range::from_usize(line.content.start_usize(), line.content.start_usize() + len)
    }
}

// --- Single-line rules ---

/// `#` to `######` followed by text.
pub(super) fn heading(src: &str) -> Option<MatchSpan<'_>> {
    let line = first_line(src)?;
    let hashes = line.text.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 {
        return None;
    }
    let level = hashes.min(MAX_HEADING_LEVEL);
    let rest = &line.text[level..];
    if rest.is_empty() {
        return None;
    }
    let block = Block::Heading {
        level: level as u8,
        text: rest.trim(),
    };
    Some(MatchSpan::new(block, line.full))
}

/// A line of three or more `-`, `_` or `*`.
pub(super) fn rule(src: &str) -> Option<MatchSpan<'_>> {
    let line = first_line(src)?;
    let text = line.text.trim_end();
    if text.len() >= 3 && text.bytes().all(|b| matches!(b, b'-' | b'_' | b'*')) {
        Some(MatchSpan::new(Block::Rule, line.full))
    } else {
        None
    }
}

/// `![alt](url "title")` at the start of the line.
pub(super) fn image(src: &str) -> Option<MatchSpan<'_>> {
    let line = first_line(src)?;
    let rest = line.text.strip_prefix("![")?;
    let alt_end = rest.find(']')?;
    let alt = &rest[..alt_end];
    let target = rest[alt_end + 1..].strip_prefix('(')?;
    let close = target.find(')')?;
    let inner = target[..close].trim();
    if inner.is_empty() {
        return None;
    }
    let (src_url, title) = split_url_title(inner);

    // "![" + alt + "](" + target + ")"
    let len = 2 + alt_end + 2 + close + 1;
    let block = Block::Image {
        alt,
        src: src_url,
        title,
    };
    Some(MatchSpan::new(block, prefix_range(&line, len)))
}

/// Split `url "title"`; anything else is all URL.
fn split_url_title(inner: &str) -> (&str, Option<&str>) {
    if let Some(space) = inner.find(char::is_whitespace) {
        let title = inner[space..].trim();
        if title.len() >= 2 && title.starts_with('"') && title.ends_with('"') {
            return (&inner[..space], Some(&title[1..title.len() - 1]));
        }
    }
    (inner, None)
}

/// `![alt][id]` at the start of a line, as `(alt, id, length)`.
fn image_declaration(text: &str) -> Option<(&str, &str, usize)> {
    let rest = text.strip_prefix("![")?;
    let alt_end = rest.find("][")?;
    let alt = &rest[..alt_end];
    let after = &rest[alt_end + 2..];
    let id_end = after.find(']')?;
    let id = &after[..id_end];
    if alt.is_empty() || id.trim().is_empty() {
        return None;
    }
    Some((alt, id, 2 + alt_end + 2 + id_end + 1))
}

/// `![alt][id]` with a later `[id]: url "title"` line, or an id already
/// defined earlier in this conversion.
pub(super) fn reference_image<'a>(src: &'a str, ctx: &RenderContext) -> Option<MatchSpan<'a>> {
    let line = first_line(src)?;
    let (alt, id, len) = image_declaration(line.text)?;
    let key = link_ref::normalize_label(id);
    let declaration = prefix_range(&line, len);

    if let Some(def) = ctx.link_refs.get(&key) {
        let block = Block::ReferenceImage {
            alt,
            key,
            def: def.clone(),
            fresh: false,
        };
        return Some(MatchSpan::new(block, declaration));
    }

    let (def_line, parsed) = later_link_ref(src, line.full.end_usize(), id, &key, ctx)?;
    let block = Block::ReferenceImage {
        alt,
        key,
        def: parsed.to_def(),
        fresh: true,
    };
    Some(MatchSpan::new(block, declaration).also_consume(def_line.full))
}

/// A line with `[^label]` markers whose definitions appear later (or were
/// already numbered). Consumes the line and each definition line it uses.
/// Markers without a definition stay in the line as written.
pub(super) fn footnote<'a>(src: &'a str, ctx: &RenderContext) -> Option<MatchSpan<'a>> {
    let line = first_line(src)?;
    let markers = footnote::markers(line.text);
    if markers.is_empty() {
        return None;
    }

    let mut refs: SmallVec<[FootnoteRef<'a>; 2]> = SmallVec::new();
    let mut definitions: SmallVec<[Range; 2]> = SmallVec::new();

    for marker in markers {
        let known = ctx.footnotes.number(&marker.key).is_some()
            || refs.iter().any(|r| r.key == marker.key);
        if known {
            refs.push(FootnoteRef {
                range: marker.range,
                key: marker.key,
                definition: None,
            });
        } else if let Some((def_line, text)) =
            later_footnote(src, line.full.end_usize(), &marker.key, ctx)
        {
            definitions.push(def_line.full);
            refs.push(FootnoteRef {
                range: marker.range,
                key: marker.key,
                definition: Some(text),
            });
        }
    }

    if refs.is_empty() {
        return None;
    }

    let block = Block::Footnote {
        line: line.text,
        refs,
    };
    let span = definitions
        .into_iter()
        .fold(MatchSpan::new(block, line.full), MatchSpan::also_consume);
    Some(span)
}

// --- Multi-line rules ---

/// `- item`, `* item`, `+ item` lines; depth from indentation.
pub(super) fn unordered_list(src: &str) -> Option<MatchSpan<'_>> {
    let (lines, span) = collect_group(src, |l| unordered_item(l).is_some())?;
    let items = lines
        .iter()
        .filter_map(|line| unordered_item(line.text))
        .collect();
    Some(MatchSpan::new(Block::UnorderedList { items }, span))
}

fn unordered_item(text: &str) -> Option<NestedItem<'_>> {
    let body = text.trim_start_matches([' ', '\t']);
    let mut chars = body.chars();
    let marker = chars.next()?;
    let gap = chars.next()?;
    if !matches!(marker, '-' | '*' | '+') || !matches!(gap, ' ' | '\t') {
        return None;
    }
    Some(NestedItem::new(body[2..].trim(), list_depth(text)))
}

/// `1. item` lines; depth from indentation.
pub(super) fn ordered_list(src: &str) -> Option<MatchSpan<'_>> {
    let (lines, span) = collect_group(src, |l| ordered_item(l).is_some())?;
    let mut start = 1;
    let mut items = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if let Some((number, item)) = ordered_item(line.text) {
            if i == 0 {
                start = number;
            }
            items.push(item);
        }
    }
    Some(MatchSpan::new(Block::OrderedList { items, start }, span))
}

fn ordered_item(text: &str) -> Option<(u64, NestedItem<'_>)> {
    let body = text.trim_start_matches([' ', '\t']);
    let digits = body.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits > MAX_LIST_MARKER_DIGITS {
        return None;
    }
    let after = body[digits..].strip_prefix('.')?;
    let content = after
        .strip_prefix(' ')
        .or_else(|| after.strip_prefix('\t'))?;
    let number = body[..digits].parse().ok()?;
    Some((number, NestedItem::new(content.trim(), list_depth(text))))
}

/// One level per two columns of indentation, starting at 1.
#[inline]
fn list_depth(text: &str) -> usize {
    indent_width(text) / 2 + 1
}

/// Pipe rows where row 1 is an alignment divider.
pub(super) fn table(src: &str) -> Option<MatchSpan<'_>> {
    let (lines, span) = collect_group(src, table::is_table_row)?;
    let rows: Vec<&str> = lines.iter().map(|line| line.text).collect();
    let parsed = TableSpec::parse(&rows)?;
    Some(MatchSpan::new(Block::Table(parsed), span))
}

/// A ```` ``` ```` fence, its lines, and the closing fence. Without a
/// closing fence the opening line is not code. Blank lines inside the
/// fence are dropped like blank lines anywhere else.
pub(super) fn fenced_code(src: &str) -> Option<MatchSpan<'_>> {
    let mut cursor = LineCursor::new(src);
    let open = cursor.next_line()?;
    let info = open.text.strip_prefix("```")?;
    if info.contains('`') {
        return None;
    }

    let mut lines = Vec::new();
    for line in cursor {
        if line.text.trim_start().starts_with("```") {
            let block = Block::FencedCode { lines };
            return Some(MatchSpan::new(block, Range::from_usize(0, line.full.end_usize())));
        }
        if !line.text.trim().is_empty() {
            lines.push(line.text);
        }
    }
    None
}

/// Lines indented by four spaces (or a tab).
pub(super) fn indented_code(src: &str) -> Option<MatchSpan<'_>> {
    let (lines, span) = collect_group(src, |l| strip_code_indent(l).is_some())?;
    let lines = lines
        .iter()
        .filter_map(|line| strip_code_indent(line.text))
        .collect();
    Some(MatchSpan::new(Block::IndentedCode { lines }, span))
}

fn strip_code_indent(text: &str) -> Option<&str> {
    text.strip_prefix("    ").or_else(|| text.strip_prefix('\t'))
}

/// `>` lines; depth is the number of `>` markers.
pub(super) fn block_quote(src: &str) -> Option<MatchSpan<'_>> {
    let (lines, span) = collect_group(src, |l| l.trim_start().starts_with('>'))?;
    let items = lines.iter().map(|line| quote_item(line.text)).collect();
    Some(MatchSpan::new(Block::BlockQuote { items }, span))
}

fn quote_item(text: &str) -> NestedItem<'_> {
    let markers_end = text
        .find(|c: char| c != '>' && !c.is_whitespace())
        .unwrap_or(text.len());
    let depth = text[..markers_end].bytes().filter(|b| *b == b'>').count();
    NestedItem::new(text[markers_end..].trim_end(), depth)
}

/// The first line, as-is. Always matches.
pub(super) fn paragraph(src: &str) -> MatchSpan<'_> {
    match first_line(src) {
        Some(line) => MatchSpan::new(Block::Paragraph { text: line.text.trim() }, line.full),
        None => MatchSpan::new(Block::Paragraph { text: "" }, Range::from_usize(0, src.len())),
    }
}

// --- Reference checks ---

/// Definition line for a normalized footnote key at or after `from`.
fn later_footnote<'a>(
    src: &'a str,
    from: usize,
    key: &str,
    ctx: &RenderContext,
) -> Option<(Line<'a>, &'a str)> {
    if ctx.is_missing(ReferenceKind::Footnote, key) {
        return None;
    }
    footnote::find_definition(src, from, key)
}

/// Reference definition for `id` (normalized as `key`) at or after `from`.
fn later_link_ref<'a>(
    src: &'a str,
    from: usize,
    id: &str,
    key: &str,
    ctx: &RenderContext,
) -> Option<(Line<'a>, link_ref::ParsedDefinition<'a>)> {
    if ctx.is_missing(ReferenceKind::Image, key) {
        return None;
    }
    link_ref::find_definition(src, from, id)
}

/// First `[^label]` marker or `![alt][id]` declaration in the block's own
/// lines that has no definition, neither recorded in `ctx` nor on a later
/// line of `src`. Every miss found is recorded in `ctx`.
pub(crate) fn dangling_reference<'a>(
    src: &'a str,
    span: &MatchSpan<'_>,
    ctx: &mut RenderContext,
) -> Option<(ReferenceKind, &'a str)> {
    if !span.block.checks_references() {
        return None;
    }
    let own = *span.consumed.first()?;
    let from = own.end_usize();
    let mut first = None;

    for line in LineCursor::new(own.slice(src)) {
        for marker in footnote::markers(line.text) {
            let resolved = ctx.footnotes.number(&marker.key).is_some()
                || later_footnote(src, from, &marker.key, ctx).is_some();
            if !resolved {
                first.get_or_insert((ReferenceKind::Footnote, marker.label));
                ctx.record_missing(ReferenceKind::Footnote, marker.key);
            }
        }

        for (at, _) in line.text.match_indices("![") {
            let Some((_, id, _)) = image_declaration(&line.text[at..]) else {
                continue;
            };
            let key = link_ref::normalize_label(id);
            let resolved = ctx.link_refs.get(&key).is_some()
                || later_link_ref(src, from, id, &key, ctx).is_some();
            if !resolved {
                first.get_or_insert((ReferenceKind::Image, id));
                ctx.record_missing(ReferenceKind::Image, key);
            }
        }
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels() {
        let span = heading("###### x").unwrap();
        assert_eq!(span.block, Block::Heading { level: 6, text: "x" });
        let span = heading("####### x").unwrap();
        assert_eq!(span.block, Block::Heading { level: 6, text: "# x" });
        assert!(heading("#").is_none());
        assert!(heading("text").is_none());
    }

    #[test]
    fn test_rule_needs_whole_line() {
        assert!(rule("---").is_some());
        assert!(rule("*_-  ").is_some());
        assert!(rule("--").is_none());
        assert!(rule("--- text").is_none());
    }

    #[test]
    fn test_image_consumes_only_the_image() {
        let src = "![alt](a.png) trailing\nnext";
        let span = image(src).unwrap();
        assert_eq!(span.consumed[0].slice(src), "![alt](a.png)");
        assert_eq!(
            span.block,
            Block::Image {
                alt: "alt",
                src: "a.png",
                title: None
            }
        );
    }

    #[test]
    fn test_image_with_title() {
        let span = image("![a](b.png \"T\")\n").unwrap();
        assert_eq!(
            span.block,
            Block::Image {
                alt: "a",
                src: "b.png",
                title: Some("T")
            }
        );
        assert_eq!(span.consumed[0], Range::new(0, 16));
    }

    #[test]
    fn test_reference_image_consumes_both_lines() {
        let src = "![photo][me]\nsome text\n[me]: https://x.org/me.jpg \"Me\"\nafter\n";
        let span = reference_image(src, &RenderContext::new()).unwrap();
        assert_eq!(span.consumed.len(), 2);
        assert_eq!(span.consumed[0].slice(src), "![photo][me]\n");
        assert_eq!(span.consumed[1].slice(src), "[me]: https://x.org/me.jpg \"Me\"\n");
        match span.block {
            Block::ReferenceImage { alt, def, fresh, .. } => {
                assert_eq!(alt, "photo");
                assert_eq!(def.url, "https://x.org/me.jpg");
                assert_eq!(def.title.as_deref(), Some("Me"));
                assert!(fresh);
            }
            other => panic!("unexpected block {other:?}"),
        }
    }

    #[test]
    fn test_reference_image_needs_later_definition() {
        assert!(reference_image("[me]: u\n![a][me]", &RenderContext::new()).is_none());
        assert!(reference_image("![a][me]\n", &RenderContext::new()).is_none());
    }

    #[test]
    fn test_footnote_collects_definition() {
        let src = "Text[^a] more.\nother\n[^a]: The note\n";
        let span = footnote(src, &RenderContext::new()).unwrap();
        assert_eq!(span.consumed.len(), 2);
        assert_eq!(span.consumed[1].slice(src), "[^a]: The note\n");
        match span.block {
            Block::Footnote { refs, .. } => {
                assert_eq!(refs.len(), 1);
                assert_eq!(refs[0].definition, Some("The note"));
            }
            other => panic!("unexpected block {other:?}"),
        }
    }

    #[test]
    fn test_footnote_without_definition_does_not_match() {
        assert!(footnote("Text[^a].\n", &RenderContext::new()).is_none());
    }

    #[test]
    fn test_unordered_depths() {
        let span = unordered_list("- a\n  - b\n    * c\n+ d\ntext").unwrap();
        match span.block {
            Block::UnorderedList { items } => {
                let depths: Vec<_> = items.iter().map(|i| i.depth).collect();
                assert_eq!(depths, [1, 2, 3, 1]);
                assert_eq!(items[2].content, "c");
            }
            other => panic!("unexpected block {other:?}"),
        }
    }

    #[test]
    fn test_ordered_start_number() {
        let span = ordered_list("3. a\n4. b").unwrap();
        match span.block {
            Block::OrderedList { items, start } => {
                assert_eq!(start, 3);
                assert_eq!(items.len(), 2);
            }
            other => panic!("unexpected block {other:?}"),
        }
        assert!(ordered_list("1234567890. too long").is_none());
        assert!(ordered_list("1.no space").is_none());
    }

    #[test]
    fn test_table_needs_divider() {
        assert!(table("| a |\n| b |").is_none());
        assert!(table("| a |\n|---|\n| 1 |").is_some());
    }

    #[test]
    fn test_fenced_code_lines() {
        let src = "```rust\nfn x() {}\n\n  y\n```\nafter";
        let span = fenced_code(src).unwrap();
        assert_eq!(span.consumed[0].slice(src), "```rust\nfn x() {}\n\n  y\n```\n");
        assert_eq!(
            span.block,
            Block::FencedCode {
                lines: vec!["fn x() {}", "  y"]
            }
        );
    }

    #[test]
    fn test_unclosed_fence_is_not_code() {
        assert!(fenced_code("```\na\n\n").is_none());
        assert!(fenced_code("```\n# Title\n- item").is_none());
        assert!(fenced_code("```").is_none());
    }

    #[test]
    fn test_indented_code() {
        let span = indented_code("    a\n        b\nc").unwrap();
        assert_eq!(
            span.block,
            Block::IndentedCode {
                lines: vec!["a", "    b"]
            }
        );
    }

    #[test]
    fn test_quote_depth_counts_markers() {
        assert_eq!(quote_item("> a"), NestedItem::new("a", 1));
        assert_eq!(quote_item("> > b"), NestedItem::new("b", 2));
        assert_eq!(quote_item(">>> c"), NestedItem::new("c", 3));
    }

    #[test]
    fn test_footnote_skips_recorded_misses() {
        let mut ctx = RenderContext::new();
        ctx.record_missing(ReferenceKind::Footnote, "a".into());
        assert!(footnote("Text[^a]\n[^a]: note\n", &ctx).is_none());
    }

    fn dangling(src: &str, span: &MatchSpan<'_>) -> Option<(ReferenceKind, String)> {
        dangling_reference(src, span, &mut RenderContext::new())
            .map(|(kind, label)| (kind, label.to_owned()))
    }

    #[test]
    fn test_dangling_reference_in_any_block() {
        let src = "- see[^x]\n- b";
        let span = unordered_list(src).unwrap();
        assert_eq!(dangling(src, &span), Some((ReferenceKind::Footnote, "x".into())));

        let src = "# Title ![a][nope]";
        let span = heading(src).unwrap();
        assert_eq!(dangling(src, &span), Some((ReferenceKind::Image, "nope".into())));

        let src = "text ![a][nope]";
        assert_eq!(dangling(src, &paragraph(src)), Some((ReferenceKind::Image, "nope".into())));
        assert_eq!(dangling("plain", &paragraph("plain")), None);
    }

    #[test]
    fn test_dangling_reference_sees_later_definitions() {
        let src = "> quote[^n]\n\n[^n]: note\n";
        let span = block_quote(src).unwrap();
        assert_eq!(dangling(src, &span), None);
    }

    #[test]
    fn test_code_is_not_checked_for_references() {
        let src = "```\nx[^nope]\n```";
        let span = fenced_code(src).unwrap();
        assert_eq!(dangling(src, &span), None);
    }

    #[test]
    fn test_dangling_reference_records_misses() {
        let mut ctx = RenderContext::new();
        let src = "| a[^x] |\n|---|";
        let span = table(src).unwrap();
        assert!(dangling_reference(src, &span, &mut ctx).is_some());
        assert!(ctx.is_missing(ReferenceKind::Footnote, "x"));
        assert!(!ctx.is_missing(ReferenceKind::Image, "x"));
    }
}
