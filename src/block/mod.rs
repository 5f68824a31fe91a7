//! Block-level classification and rendering.
//!
//! The classifier looks at the start of the remaining input and tries each
//! [`BlockKind`] in [`BlockKind::PRIORITY`] order; the first rule that
//! matches wins, and the paragraph rule catches everything else:
//! - Headings, horizontal rules, images
//! - Reference-style images and footnotes
//! - Unordered / ordered lists
//! - Tables
//! - Fenced / indented code
//! - Block quotes
//! - Paragraphs

mod detect;
mod model;
mod render;

pub(crate) use detect::dangling_reference;
pub use model::{Block, BlockKind, FootnoteRef, MatchSpan};
pub use render::{CODE_BLOCK_CLASS, RULE_CLASS};

use crate::document::RenderContext;

/// Classify the start of `src`, falling back to a paragraph.
///
/// `src` must start with a non-blank line.
pub fn classify<'a>(src: &'a str, ctx: &RenderContext) -> MatchSpan<'a> {
    BlockKind::PRIORITY
        .iter()
        .find_map(|kind| kind.detect(src, ctx))
        .unwrap_or_else(|| detect::paragraph(src))
}
