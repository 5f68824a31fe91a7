//! Document driver.
//!
//! Repeatedly classifies the start of the remaining input, renders the
//! winning block, runs the inline formatter over it, and removes exactly
//! the consumed byte ranges. Terminates when nothing is left.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::Options;
use crate::Range;
use crate::block;
use crate::cursor::LineCursor;
use crate::error::{ReferenceKind, RenderError, snippet};
use crate::footnote::FootnoteStore;
use crate::inline::InlineFormatter;
use crate::link_ref::LinkRefStore;

/// State scoped to a single conversion.
#[derive(Debug, Default)]
pub struct RenderContext {
    /// Footnote numbering.
    pub footnotes: FootnoteStore,
    /// Reference definitions already consumed.
    pub link_refs: LinkRefStore,
    /// Normalized footnote labels with no definition left in the input.
    missing_footnotes: FxHashSet<String>,
    /// Normalized image ids with no definition left in the input.
    missing_images: FxHashSet<String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a lookup for `key` already failed. The input only shrinks,
    /// so a definition missing once stays missing.
    pub fn is_missing(&self, kind: ReferenceKind, key: &str) -> bool {
        match kind {
            ReferenceKind::Footnote => self.missing_footnotes.contains(key),
            ReferenceKind::Image => self.missing_images.contains(key),
        }
    }

    /// Remember that `key` has no definition in the rest of the input.
    pub fn record_missing(&mut self, kind: ReferenceKind, key: String) {
        match kind {
            ReferenceKind::Footnote => self.missing_footnotes.insert(key),
            ReferenceKind::Image => self.missing_images.insert(key),
        };
    }
}

/// The input not yet rendered.
///
/// Consuming from the front moves `start` instead of shifting the text.
/// The consumed prefix is dropped once it outgrows the rest.
#[derive(Debug)]
pub struct Remaining {
    text: String,
    start: usize,
}

impl Remaining {
    /// Take ownership of the document with line endings normalized.
    pub fn new(input: &str) -> Self {
        let text = if input.contains('\r') {
            input.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            input.to_owned()
        };
        Self { text, start: 0 }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text[self.start..]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.text.len()
    }

    /// Drop blank lines at the start.
    pub fn skip_blank_lines(&mut self) {
        let mut cursor = LineCursor::new(self.as_str());
        cursor.skip_blank_lines();
        let skipped = cursor.offset();
        self.start += skipped;
        self.compact();
    }

    /// Remove the given ranges, relative to [`as_str`](Self::as_str).
    /// Overlapping ranges are merged; returns the number of bytes removed.
    pub fn consume(&mut self, ranges: &[Range]) -> usize {
        let len = self.as_str().len() as u32;
        let mut merged: SmallVec<[Range; 2]> = SmallVec::new();
        let mut sorted: SmallVec<[Range; 2]> = ranges.iter().copied().collect();
        sorted.sort_unstable();
        for range in sorted {
            let range = Range::new(range.start, range.end.min(len));
            if range.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.end >= range.start => *last = last.cover(&range),
                _ => merged.push(range),
            }
        }

        let mut removed = 0;
        for range in merged.iter().rev() {
            if range.start == 0 {
                self.start += range.end_usize();
            } else {
                self.text
                    .drain(self.start + range.start_usize()..self.start + range.end_usize());
            }
            removed += range.len();
        }
        self.compact();
        removed
    }

    fn compact(&mut self) {
        if self.start * 2 > self.text.len() {
            self.text.drain(..self.start);
            self.start = 0;
        }
    }
}

/// Rendered blocks in document order.
#[derive(Debug, Default)]
pub struct RenderedDocument {
    blocks: Vec<String>,
}

impl RenderedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, block: String) {
        self.blocks.push(block);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Join blocks with a blank line.
    pub fn into_html(self) -> String {
        self.blocks.join("\n\n")
    }
}

/// Render a whole document.
pub fn render_document(input: &str, options: &Options) -> Result<RenderedDocument, RenderError> {
    let mut remaining = Remaining::new(input);
    let mut ctx = RenderContext::new();
    let formatter = InlineFormatter::new(options);
    let mut document = RenderedDocument::new();

    loop {
        remaining.skip_blank_lines();
        if remaining.is_empty() {
            break;
        }

        let (kind, consumed, markup) = {
            let src = remaining.as_str();
            let span = block::classify(src, &ctx);
            let kind = span.block.kind();

            if let Some((reference, label)) = block::dangling_reference(src, &span, &mut ctx) {
                if options.strict_references {
                    return Err(RenderError::DanglingReference {
                        kind: reference,
                        label: label.to_owned(),
                        snippet: snippet(src),
                    });
                }
                tracing::warn!(kind = %reference, label, "reference has no definition");
            }

            if span.consumed_len() == 0 {
                return Err(RenderError::NoProgress {
                    rule: kind,
                    snippet: snippet(src),
                });
            }

            let markup = span.block.render(&mut ctx, options);
            (kind, span.consumed, markup)
        };

        let removed = remaining.consume(&consumed);
        tracing::trace!(rule = %kind, consumed = removed, "rendered block");
        if removed == 0 {
            return Err(RenderError::NoProgress {
                rule: kind,
                snippet: snippet(remaining.as_str()),
            });
        }

        document.push(formatter.format(&markup));
    }

    tracing::debug!(blocks = document.len(), input_len = input.len(), "rendered document");
    Ok(document)
}
