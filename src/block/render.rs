//! Block renderers: one matched block in, one markup string out.

use crate::Options;
use crate::document::RenderContext;
use crate::escape;
use crate::nested::{GroupTags, write_nested_group};
use crate::render::HtmlWriter;

use super::model::{Block, FootnoteRef};

/// Class on the code block container.
pub const CODE_BLOCK_CLASS: &str = "fencing";

/// Class on the horizontal rule container.
pub const RULE_CLASS: &str = "horizontal-rule";

impl Block<'_> {
    /// Render this block. Footnote numbers and reference definitions are
    /// recorded in `ctx`.
    pub fn render(&self, ctx: &mut RenderContext, options: &Options) -> String {
        let mut writer = HtmlWriter::new();
        match self {
            Block::Heading { level, text } => writer.heading(*level, text),
            Block::Rule => writer.thematic_break(RULE_CLASS),
            Block::Image { alt, src, title } => writer.image(src, alt, *title),
            Block::ReferenceImage {
                alt,
                key,
                def,
                fresh,
            } => {
                if *fresh {
                    ctx.link_refs.insert(key.clone(), def.clone());
                }
                writer.image(&def.url, alt, def.title.as_deref());
            }
            Block::Footnote { line, refs, .. } => render_footnote(&mut writer, line, refs, ctx),
            Block::UnorderedList { items } => {
                write_nested_group(&mut writer, items, &GroupTags::new("ul", Some("li")));
            }
            Block::OrderedList { items, start } => {
                let start = (options.ordered_list_start && *start != 1).then_some(*start);
                let tags = GroupTags::new("ol", Some("li")).with_start(start);
                write_nested_group(&mut writer, items, &tags);
            }
            Block::Table(table) => table.render(&mut writer),
            Block::FencedCode { lines } => {
                render_code(&mut writer, lines, options, |line| {
                    escape::nbsp_whitespace(line).into_owned()
                });
            }
            Block::IndentedCode { lines } => {
                render_code(&mut writer, lines, options, str::to_owned);
            }
            Block::BlockQuote { items } => {
                write_nested_group(&mut writer, items, &GroupTags::new("blockquote", None));
            }
            Block::Paragraph { text, .. } => writer.paragraph(text),
        }
        writer.into_string()
    }
}

/// Paragraph with `<sup>[n]</sup>` markers, then one line per newly
/// numbered footnote.
fn render_footnote(writer: &mut HtmlWriter, line: &str, refs: &[FootnoteRef<'_>], ctx: &mut RenderContext) {
    let mut text = String::with_capacity(line.len() + 16 * refs.len());
    let mut definitions = Vec::new();
    let mut last = 0;

    for fref in refs {
        let (number, fresh) = ctx.footnotes.assign(&fref.key);
        text.push_str(&line[last..fref.range.start_usize()]);
        text.push_str(&format!("<sup>[{number}]</sup>"));
        last = fref.range.end_usize();
        if fresh {
            if let Some(definition) = fref.definition {
                definitions.push((number, definition));
            }
        }
    }
    text.push_str(&line[last..]);

    writer.paragraph(text.trim());
    for (number, definition) in definitions {
        writer.newline();
        writer.open_tag_start("p");
        writer.write_attr("class", "footnote");
        writer.open_tag_end();
        writer.write_str(&format!("{number}. {definition}"));
        writer.close_tag("p");
    }
}

fn render_code(
    writer: &mut HtmlWriter,
    lines: &[&str],
    options: &Options,
    transform: impl Fn(&str) -> String,
) {
    writer.code_block_start(CODE_BLOCK_CLASS);
    for line in lines {
        let line = if options.escape_code {
            escape::escape_text(line)
        } else {
            (*line).into()
        };
        writer.newline();
        writer.code_line(&transform(&*line));
    }
    writer.newline();
    writer.code_block_end();
}
