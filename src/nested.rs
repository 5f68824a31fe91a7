//! Nested-group builder shared by lists and block quotes.
//!
//! Each source line becomes a [`NestedItem`] with a depth. The builder walks
//! the items in order and emits exactly as many wrapper open/close tags as
//! needed to move between depths, always returning to depth 0.

use crate::limits::MAX_BLOCK_NESTING;
use crate::render::HtmlWriter;

/// One line of a list or quote group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestedItem<'a> {
    /// Item text with markers and indentation stripped.
    pub content: &'a str,
    /// Nesting depth (1 = outermost wrapper).
    pub depth: usize,
}

impl<'a> NestedItem<'a> {
    #[inline]
    pub fn new(content: &'a str, depth: usize) -> Self {
        Self { content, depth }
    }
}

/// Tags used for a nested group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupTags {
    /// Wrapper opened per depth level (`ul`, `ol`, `blockquote`).
    pub wrapper: &'static str,
    /// Tag around each item; `None` wraps items in `<p>`.
    pub item: Option<&'static str>,
    /// `start` attribute for the outermost wrapper.
    pub start: Option<u64>,
}

impl GroupTags {
    pub const fn new(wrapper: &'static str, item: Option<&'static str>) -> Self {
        Self {
            wrapper,
            item,
            start: None,
        }
    }

    pub const fn with_start(mut self, start: Option<u64>) -> Self {
        self.start = start;
        self
    }
}

/// Write a nested group.
///
/// Output is always balanced: every opened wrapper is closed, and the
/// final depth is 0. Depths above [`MAX_BLOCK_NESTING`] are clamped.
pub fn write_nested_group(writer: &mut HtmlWriter, items: &[NestedItem<'_>], tags: &GroupTags) {
    let item_tag = tags.item.unwrap_or("p");
    let mut current = 0usize;
    let mut start = tags.start;

    for item in items {
        let depth = item.depth.min(MAX_BLOCK_NESTING);

        while depth > current {
            line_start(writer, current);
            writer.open_tag_start(tags.wrapper);
            if current == 0 {
                if let Some(n) = start.take() {
                    writer.write_attr("start", &n.to_string());
                }
            }
            writer.open_tag_end();
            current += 1;
        }

        while depth < current {
            current -= 1;
            line_start(writer, current);
            writer.close_tag(tags.wrapper);
        }

        line_start(writer, current);
        writer.element(item_tag, item.content);
    }

    while current > 0 {
        current -= 1;
        line_start(writer, current);
        writer.close_tag(tags.wrapper);
    }
}

/// Begin a new output line at the given depth.
#[inline]
fn line_start(writer: &mut HtmlWriter, depth: usize) {
    if !writer.is_empty() {
        writer.newline();
    }
    writer.indent(depth);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(items: &[NestedItem<'_>], tags: GroupTags) -> String {
        let mut writer = HtmlWriter::new();
        write_nested_group(&mut writer, items, &tags);
        writer.into_string()
    }

    #[test]
    fn test_flat_list() {
        let items = [NestedItem::new("a", 1), NestedItem::new("b", 1)];
        let html = render(&items, GroupTags::new("ul", Some("li")));
        assert_eq!(html, "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>");
    }

    #[test]
    fn test_nested_and_back() {
        let items = [
            NestedItem::new("a", 1),
            NestedItem::new("b", 2),
            NestedItem::new("c", 1),
        ];
        let html = render(&items, GroupTags::new("ul", Some("li")));
        assert_eq!(
            html,
            "<ul>\n  <li>a</li>\n  <ul>\n    <li>b</li>\n  </ul>\n  <li>c</li>\n</ul>"
        );
    }

    #[test]
    fn test_depth_jump_opens_every_level() {
        let items = [NestedItem::new("deep", 3), NestedItem::new("top", 1)];
        let html = render(&items, GroupTags::new("blockquote", None));
        assert_eq!(html.matches("<blockquote>").count(), 3);
        assert_eq!(html.matches("</blockquote>").count(), 3);
        assert!(html.contains("      <p>deep</p>"));
        assert!(html.contains("  <p>top</p>"));
    }

    #[test]
    fn test_start_attribute_only_on_outer_wrapper() {
        let items = [NestedItem::new("x", 1), NestedItem::new("y", 2)];
        let html = render(&items, GroupTags::new("ol", Some("li")).with_start(Some(3)));
        assert!(html.starts_with("<ol start=\"3\">"));
        assert_eq!(html.matches("start=").count(), 1);
    }

    #[test]
    fn test_depth_is_clamped() {
        let items = [NestedItem::new("x", MAX_BLOCK_NESTING + 10)];
        let html = render(&items, GroupTags::new("ul", Some("li")));
        assert_eq!(html.matches("<ul>").count(), MAX_BLOCK_NESTING);
        assert_eq!(html.matches("</ul>").count(), MAX_BLOCK_NESTING);
    }
}
