//! Compact byte spans into the remaining input.
//!
//! Uses `u32` offsets to keep match spans small. Supports documents up to 4GB.

/// Half-open byte range `[start, end)` into a string buffer.
///
/// # Example
/// ```
/// use mdhtml::Range;
///
/// let input = "Hello, World!";
/// let range = Range::new(0, 5);
/// assert_eq!(range.slice(input), "Hello");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

const _: () = assert!(std::mem::size_of::<Range>() == 8);

impl Range {
    /// Create a new range.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a range from usize offsets.
    ///
    /// # Panics
    /// Panics in debug mode if values exceed u32::MAX.
    #[inline]
    pub fn from_usize(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= u32::MAX as usize);
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    #[inline]
    pub fn start_usize(&self) -> usize {
        self.start as usize
    }

    #[inline]
    pub fn end_usize(&self) -> usize {
        self.end as usize
    }

    /// Get the text this range refers to.
    ///
    /// Ranges are always produced on `char` boundaries by the line scanner.
    #[inline]
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start_usize()..self.end_usize()]
    }

    /// Length of the range in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    /// Check if the range is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if `pos` falls inside this range.
    #[inline]
    pub const fn contains(&self, pos: u32) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Extend this range to cover `other` as well.
    #[inline]
    pub fn cover(&self, other: &Range) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_slice() {
        let input = "Hello, World!";
        let range = Range::new(7, 12);
        assert_eq!(range.slice(input), "World");
    }

    #[test]
    fn test_range_len() {
        let range = Range::new(5, 10);
        assert_eq!(range.len(), 5);
        assert!(!range.is_empty());
        assert!(Range::new(3, 3).is_empty());
    }

    #[test]
    fn test_range_cover() {
        let a = Range::new(0, 4);
        let c = Range::new(4, 6);
        assert_eq!(a.cover(&c), Range::new(0, 6));
        assert_eq!(c.cover(&a), Range::new(0, 6));
    }

    #[test]
    fn test_range_contains() {
        let r = Range::new(12, 14);
        assert!(r.contains(12));
        assert!(!r.contains(14));
    }
}
