//! Block rules, matched spans, and matched block contents.

use std::fmt;

use smallvec::SmallVec;

use crate::Range;
use crate::document::RenderContext;
use crate::link_ref::LinkRefDef;
use crate::nested::NestedItem;
use crate::table::TableSpec;

use super::detect;

/// The block rules, one per block construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    Rule,
    Image,
    ReferenceImage,
    Footnote,
    UnorderedList,
    OrderedList,
    Table,
    FencedCode,
    IndentedCode,
    BlockQuote,
    Paragraph,
}

impl BlockKind {
    /// Rules tried in order; first match wins. [`BlockKind::Paragraph`] is
    /// the fallback and is not listed.
    pub const PRIORITY: [BlockKind; 11] = [
        BlockKind::Heading,
        BlockKind::Rule,
        BlockKind::Image,
        BlockKind::ReferenceImage,
        BlockKind::Footnote,
        BlockKind::UnorderedList,
        BlockKind::OrderedList,
        BlockKind::Table,
        BlockKind::FencedCode,
        BlockKind::IndentedCode,
        BlockKind::BlockQuote,
    ];

    /// Rule name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Rule => "horizontal-rule",
            Self::Image => "image",
            Self::ReferenceImage => "image-with-reference",
            Self::Footnote => "footnote",
            Self::UnorderedList => "unordered-list",
            Self::OrderedList => "ordered-list",
            Self::Table => "table",
            Self::FencedCode => "fenced-code",
            Self::IndentedCode => "indented-code",
            Self::BlockQuote => "blockquote",
            Self::Paragraph => "paragraph",
        }
    }

    /// Try this rule against the start of `src`.
    pub fn detect<'a>(self, src: &'a str, ctx: &RenderContext) -> Option<MatchSpan<'a>> {
        match self {
            Self::Heading => detect::heading(src),
            Self::Rule => detect::rule(src),
            Self::Image => detect::image(src),
            Self::ReferenceImage => detect::reference_image(src, ctx),
            Self::Footnote => detect::footnote(src, ctx),
            Self::UnorderedList => detect::unordered_list(src),
            Self::OrderedList => detect::ordered_list(src),
            Self::Table => detect::table(src),
            Self::FencedCode => detect::fenced_code(src),
            Self::IndentedCode => detect::indented_code(src),
            Self::BlockQuote => detect::block_quote(src),
            Self::Paragraph => Some(detect::paragraph(src)),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved footnote marker inside a footnote line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootnoteRef<'a> {
    /// Marker span within the line.
    pub range: Range,
    /// Normalized label.
    pub key: String,
    /// Definition text, when the definition line is consumed with this block.
    pub definition: Option<&'a str>,
}

/// Content captured by a winning rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    Heading {
        level: u8,
        text: &'a str,
    },
    Rule,
    Image {
        alt: &'a str,
        src: &'a str,
        title: Option<&'a str>,
    },
    ReferenceImage {
        alt: &'a str,
        key: String,
        def: LinkRefDef,
        /// True when the definition line was found in this block's input
        /// (and must be remembered for later declarations).
        fresh: bool,
    },
    Footnote {
        line: &'a str,
        refs: SmallVec<[FootnoteRef<'a>; 2]>,
    },
    UnorderedList {
        items: Vec<NestedItem<'a>>,
    },
    OrderedList {
        items: Vec<NestedItem<'a>>,
        start: u64,
    },
    Table(TableSpec<'a>),
    FencedCode {
        lines: Vec<&'a str>,
    },
    IndentedCode {
        lines: Vec<&'a str>,
    },
    BlockQuote {
        items: Vec<NestedItem<'a>>,
    },
    Paragraph {
        text: &'a str,
    },
}

impl Block<'_> {
    /// The rule that produced this block.
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Heading { .. } => BlockKind::Heading,
            Self::Rule => BlockKind::Rule,
            Self::Image { .. } => BlockKind::Image,
            Self::ReferenceImage { .. } => BlockKind::ReferenceImage,
            Self::Footnote { .. } => BlockKind::Footnote,
            Self::UnorderedList { .. } => BlockKind::UnorderedList,
            Self::OrderedList { .. } => BlockKind::OrderedList,
            Self::Table(_) => BlockKind::Table,
            Self::FencedCode { .. } => BlockKind::FencedCode,
            Self::IndentedCode { .. } => BlockKind::IndentedCode,
            Self::BlockQuote { .. } => BlockKind::BlockQuote,
            Self::Paragraph { .. } => BlockKind::Paragraph,
        }
    }

    /// Whether reference markers in this block's lines must resolve. Code
    /// is literal, and image blocks resolve their own reference.
    pub fn checks_references(&self) -> bool {
        !matches!(
            self,
            Self::Rule
                | Self::Image { .. }
                | Self::ReferenceImage { .. }
                | Self::FencedCode { .. }
                | Self::IndentedCode { .. }
        )
    }
}

/// A winning rule's match: captured content plus the input it consumes.
///
/// `consumed` may hold several non-adjacent ranges (a declaration and its
/// definition line). Ranges are offsets into the remaining input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan<'a> {
    pub block: Block<'a>,
    pub consumed: SmallVec<[Range; 2]>,
}

impl<'a> MatchSpan<'a> {
    pub fn new(block: Block<'a>, consumed: Range) -> Self {
        let mut ranges = SmallVec::new();
        ranges.push(consumed);
        Self {
            block,
            consumed: ranges,
        }
    }

    /// Add another consumed range.
    pub fn also_consume(mut self, range: Range) -> Self {
        self.consumed.push(range);
        self
    }

    /// Total bytes consumed, counting overlapping ranges once.
    pub fn consumed_len(&self) -> usize {
        let mut ranges = self.consumed.clone();
        ranges.sort_unstable();
        let mut total = 0;
        let mut covered_to = 0u32;
        for r in ranges {
            let start = r.start.max(covered_to);
            if r.end > start {
                total += (r.end - start) as usize;
                covered_to = r.end;
            }
        }
        total
    }
}
