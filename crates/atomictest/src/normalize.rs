//! Whitespace normalization for expected text blocks.
//!
//! Expected output is usually written as an indented multi-line literal
//! inside example code. Before comparison the block is re-indented so the
//! source indentation does not count:
//!
//! ```rust
//! use atomictest::normalize::trim_indent;
//!
//! let block = "
//!     first
//!       nested
//!     last
//! ";
//! assert_eq!(trim_indent(block), "first\n  nested\nlast");
//! ```

/// Convert `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Strip the common leading indentation of a multi-line block.
///
/// A blank first or last line is dropped, the minimum indentation over the
/// non-blank lines is removed from each of them, and blank lines become
/// empty. Spaces and tabs each count as one column.
pub fn trim_indent(s: &str) -> String {
    let normalized = normalize_newlines(s);
    let mut lines: Vec<&str> = normalized.split('\n').collect();

    if lines.len() > 1 && lines.last().is_some_and(|l| is_blank(l)) {
        lines.pop();
    }
    if lines.first().is_some_and(|l| is_blank(l)) {
        lines.remove(0);
    }

    let min_indent = lines
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| indent_width(line))
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if is_blank(line) {
                String::new()
            } else {
                line.chars().skip(min_indent).collect()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse a multi-line block into one logical line, joining lines with a
/// single space.
pub fn collapse_lines(s: &str) -> String {
    s.replace('\n', " ")
}
