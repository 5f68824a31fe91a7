//! HTML escaping utilities.
//!
//! Fast path: scans for the first escapable byte with `memchr` and borrows
//! the input untouched when there is nothing to escape.

use std::borrow::Cow;

use memchr::{memchr, memchr3};

/// Escape a value for use inside a double-quoted attribute.
///
/// # Example
/// ```
/// use mdhtml::escape::escape_attr;
///
/// assert_eq!(escape_attr("a \"b\""), "a &quot;b&quot;");
/// assert_eq!(escape_attr("plain"), "plain");
/// ```
#[inline]
pub fn escape_attr(value: &str) -> Cow<'_, str> {
    let bytes = value.as_bytes();
    if memchr3(b'"', b'<', b'>', bytes).is_none() && memchr(b'&', bytes).is_none() {
        return Cow::Borrowed(value);
    }
    html_escape::encode_double_quoted_attribute(value)
}

/// Escape `<`, `>` and `&` in text content.
#[inline]
pub fn escape_text(text: &str) -> Cow<'_, str> {
    if memchr3(b'<', b'>', b'&', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    html_escape::encode_text(text)
}

/// Replace every whitespace character with a non-breaking space entity.
pub fn nbsp_whitespace(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_whitespace) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        if ch.is_whitespace() {
            out.push_str("&nbsp;");
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("x.png"), "x.png");
        assert!(matches!(escape_attr("x.png"), Cow::Borrowed(_)));
        assert_eq!(escape_attr("a&b"), "a&amp;b");
        assert_eq!(escape_attr("<\">"), "&lt;&quot;&gt;");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("<div>"), "&lt;div&gt;");
        assert_eq!(escape_text("a \"q\""), "a \"q\"");
    }

    #[test]
    fn test_nbsp_whitespace() {
        assert_eq!(nbsp_whitespace("  x y"), "&nbsp;&nbsp;x&nbsp;y");
        assert_eq!(nbsp_whitespace("xy"), "xy");
    }
}
