//! Caps on pathological inputs.
//!
//! These limits keep nesting, table width and number parsing bounded
//! regardless of what the document contains.

/// Maximum nesting depth for lists and block quotes.
pub const MAX_BLOCK_NESTING: usize = 32;

/// Maximum heading level.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Maximum table columns; extra cells are dropped.
pub const MAX_TABLE_COLUMNS: usize = 128;

/// Maximum digits in an ordered list marker (prevents big-integer parsing).
pub const MAX_LIST_MARKER_DIGITS: usize = 9;

/// Maximum footnote / reference label length in bytes.
pub const MAX_LABEL_LEN: usize = 999;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_reasonable() {
        const { assert!(MAX_BLOCK_NESTING >= 16) };
        const { assert!(MAX_BLOCK_NESTING <= 64) };
        const { assert!(MAX_HEADING_LEVEL == 6) };
        const { assert!(MAX_LIST_MARKER_DIGITS <= 9) };
    }
}
