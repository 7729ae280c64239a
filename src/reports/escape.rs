//! Escaping for Markdown output.
//!
//! Property values come straight from the snapshot text and routinely hold
//! backslashes (`PCI\VEN_10DE&DEV_2206`), pipes or brackets.

/// Escape a string for a Markdown table cell.
///
/// ```
/// use hwid_diff::reports::escape::escape_markdown_table;
///
/// assert_eq!(escape_markdown_table("a | b"), "a \\| b");
/// assert_eq!(escape_markdown_table("PCI\\VEN_10DE"), "PCI\\\\VEN_10DE");
/// ```
#[must_use]
pub fn escape_markdown_table(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => result.push_str("\\|"),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push(' '),
            '\r' => {}
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for inline Markdown such as headings.
#[must_use]
pub fn escape_markdown_inline(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '*' | '_' | '`' | '[' | ']' | '#' | '!' | '~' | '|' | '<' | '>' | '\\' => {
                result.push('\\');
                result.push(c);
            }
            '\n' => result.push(' '),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_escape_newlines() {
        assert_eq!(escape_markdown_table("line1\r\nline2"), "line1 line2");
    }

    #[test]
    fn test_inline_escape() {
        assert_eq!(escape_markdown_inline("NIC_1 *primary*"), "NIC\\_1 \\*primary\\*");
        assert_eq!(escape_markdown_inline("plain"), "plain");
    }
}
