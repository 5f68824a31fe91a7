//! Markup output writer.
//!
//! Block renderers write into an [`HtmlWriter`]; one writer produces one
//! rendered block. Nested output is indented by two spaces per depth.

use crate::escape;

/// Two spaces per nesting level.
const INDENT_UNIT: &str = "  ";

/// Markup writer with a growable buffer.
///
/// # Example
/// ```
/// use mdhtml::HtmlWriter;
///
/// let mut writer = HtmlWriter::new();
/// writer.heading(2, "Title");
/// assert_eq!(writer.into_string(), "<h2>Title</h2>");
/// ```
#[derive(Debug, Default)]
pub struct HtmlWriter {
    out: String,
}

impl HtmlWriter {
    /// Create a new writer with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            out: String::with_capacity(256),
        }
    }

    /// Write text without escaping.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Write a double-quoted attribute: ` name="value"`.
    #[inline]
    pub fn write_attr(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        self.out.push_str(&escape::escape_attr(value));
        self.out.push('"');
    }

    /// Write a newline.
    #[inline]
    pub fn newline(&mut self) {
        self.out.push('\n');
    }

    /// Write indentation for the given depth.
    #[inline]
    pub fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str(INDENT_UNIT);
        }
    }

    /// Check if output is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Get output as str.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Take ownership of the output.
    #[inline]
    pub fn into_string(self) -> String {
        self.out
    }

    // --- Tag helpers ---

    /// Write opening tag: `<tag>`
    #[inline]
    pub fn open_tag(&mut self, tag: &str) {
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
    }

    /// Write the start of an opening tag without its `>`: `<tag`
    #[inline]
    pub fn open_tag_start(&mut self, tag: &str) {
        self.out.push('<');
        self.out.push_str(tag);
    }

    /// Finish an opening tag started with [`open_tag_start`](Self::open_tag_start).
    #[inline]
    pub fn open_tag_end(&mut self) {
        self.out.push('>');
    }

    /// Write closing tag: `</tag>`
    #[inline]
    pub fn close_tag(&mut self, tag: &str) {
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    /// Write `<tag>content</tag>`.
    #[inline]
    pub fn element(&mut self, tag: &str, content: &str) {
        self.open_tag(tag);
        self.out.push_str(content);
        self.close_tag(tag);
    }

    // --- Block elements ---

    /// Write a heading: `<hN>text</hN>`
    pub fn heading(&mut self, level: u8, text: &str) {
        debug_assert!((1..=6).contains(&level));
        let tag = heading_tag(level);
        self.element(tag, text);
    }

    /// Write a paragraph: `<p>text</p>`
    #[inline]
    pub fn paragraph(&mut self, text: &str) {
        self.element("p", text);
    }

    /// Write an empty classed container: `<div class=".."></div>`
    #[inline]
    pub fn thematic_break(&mut self, class: &str) {
        self.open_tag_start("div");
        self.write_attr("class", class);
        self.open_tag_end();
        self.close_tag("div");
    }

    /// Write an image: `<img src=".." alt=".." title=".." />`
    pub fn image(&mut self, src: &str, alt: &str, title: Option<&str>) {
        self.open_tag_start("img");
        self.write_attr("src", src);
        self.write_attr("alt", alt);
        if let Some(title) = title {
            self.write_attr("title", title);
        }
        self.out.push_str(" />");
    }

    /// Write the opening of a code container: `<div class="..">`
    pub fn code_block_start(&mut self, class: &str) {
        self.open_tag_start("div");
        self.write_attr("class", class);
        self.open_tag_end();
    }

    /// Write the closing of a code container.
    #[inline]
    pub fn code_block_end(&mut self) {
        self.close_tag("div");
    }

    /// Write one indented code line: `  <code>line</code>`
    #[inline]
    pub fn code_line(&mut self, line: &str) {
        self.indent(1);
        self.element("code", line);
    }
}

/// Tag name for a heading level.
fn heading_tag(level: u8) -> &'static str {
    match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}
