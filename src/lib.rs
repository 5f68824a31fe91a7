//! mdhtml: rule-driven lightweight markup to HTML converter
//!
//! A document is converted one block at a time. Each block rule is tried
//! against the start of the remaining input in a fixed priority order; the
//! first match renders its block, the inline formatter runs over the
//! result, and exactly the matched byte ranges are removed from the input.
//!
//! # Design Principles
//! - Position-based consumption: ranges into the remaining input, never
//!   text search-and-delete
//! - Guaranteed progress: a block that consumes nothing is an error
//! - Call-scoped state: footnote numbers and reference definitions live
//!   in a per-conversion [`RenderContext`]

pub mod block;
pub mod cursor;
pub mod document;
pub mod error;
pub mod escape;
pub mod footnote;
pub mod inline;
pub mod limits;
pub mod link_ref;
pub mod nested;
pub mod range;
pub mod render;
pub mod table;

// Re-export primary types
pub use block::{BlockKind, MatchSpan};
pub use document::{RenderContext, RenderedDocument, render_document};
pub use error::{ReferenceKind, RenderError};
pub use inline::{InlineFormatter, InlineRule};
pub use link_ref::{LinkRefDef, LinkRefStore};
pub use nested::NestedItem;
pub use range::Range;
pub use render::HtmlWriter;
pub use table::TableSpec;

/// Conversion options.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Fail on footnote markers or image declarations with no definition
    /// instead of rendering them as paragraph text.
    pub strict_references: bool,
    /// Autolink and strikethrough replace only their first match per block.
    pub first_occurrence_only: bool,
    /// Emit `start="n"` on ordered lists that do not begin at 1.
    pub ordered_list_start: bool,
    /// Escape `<`, `>` and `&` in code block lines.
    pub escape_code: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strict_references: false,
            first_occurrence_only: false,
            ordered_list_start: true,
            escape_code: true,
        }
    }
}

/// Convert markup to HTML.
///
/// This is the primary API for simple use cases.
///
/// # Example
/// ```
/// let html = mdhtml::to_html("# Hello\n\nWorld");
/// assert_eq!(html, "<h1>Hello</h1>\n\n<p>World</p>");
/// ```
pub fn to_html(input: &str) -> String {
    to_html_with_options(input, &Options::default())
}

/// Convert markup to HTML with options.
///
/// Never fails: a conversion error is logged and yields an empty string.
/// Use [`try_to_html`] to observe the error.
pub fn to_html_with_options(input: &str, options: &Options) -> String {
    match try_to_html(input, options) {
        Ok(html) => html,
        Err(err) => {
            tracing::error!(error = %err, "conversion failed");
            String::new()
        }
    }
}

/// Convert markup to HTML, reporting conversion errors.
///
/// # Example
/// ```
/// use mdhtml::{Options, RenderError};
///
/// let strict = Options { strict_references: true, ..Options::default() };
/// let err = mdhtml::try_to_html("Text[^nope].", &strict).unwrap_err();
/// assert!(matches!(err, RenderError::DanglingReference { .. }));
/// ```
pub fn try_to_html(input: &str, options: &Options) -> Result<String, RenderError> {
    render_document(input, options).map(RenderedDocument::into_html)
}
