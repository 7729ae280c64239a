//! Splitting snapshot text into sections and reading `key: value` lines.

use super::header::is_section_header;
use crate::model::Properties;

/// Lines of one section; the first line is its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawSection<'a> {
    pub index: usize,
    pub lines: Vec<&'a str>,
}

impl<'a> RawSection<'a> {
    /// Trimmed first line.
    pub fn title(&self) -> &'a str {
        self.lines.first().map_or("", |l| l.trim())
    }
}

/// Lines made only of rule characters carry no content.
fn is_decoration(line: &str) -> bool {
    line.chars()
        .all(|c| c.is_whitespace() || matches!(c, '=' | '-' | '*' | '#' | '_'))
}

/// Split `text` into sections, each starting at a header line.
///
/// Content ahead of the first header becomes a leading section of its own.
/// Blank and rule lines never open that leading section.
pub(crate) fn split_sections(text: &str) -> Vec<RawSection<'_>> {
    let mut sections = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for raw in text.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if is_section_header(line) {
            if !current.is_empty() {
                sections.push(RawSection {
                    index: sections.len(),
                    lines: std::mem::take(&mut current),
                });
            }
            current.push(line);
        } else if !current.is_empty() || !is_decoration(line) {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sections.push(RawSection {
            index: sections.len(),
            lines: current,
        });
    }
    sections
}

/// Collect properties from every line containing a colon.
///
/// Split happens at the first colon; a repeated key keeps its last value.
pub(crate) fn extract_properties(lines: &[&str]) -> Properties {
    let mut properties = Properties::new();
    for line in lines {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        properties.insert(key.to_string(), value.trim().to_string());
    }
    properties
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_headers() {
        let text = "CPU INFORMATION\nName: X\nGPU INFORMATION\nName: Y\n";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title(), "CPU INFORMATION");
        assert_eq!(sections[1].title(), "GPU INFORMATION");
        assert_eq!(sections[1].index, 1);
    }

    #[test]
    fn test_crlf_lines() {
        let text = "CPU INFORMATION\r\nName: X\r\n";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].lines[1], "Name: X");
    }

    #[test]
    fn test_preamble_becomes_leading_section() {
        let text = "Report generated by tool\n\nCPU INFORMATION\nName: X\n";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title(), "Report generated by tool");
    }

    #[test]
    fn test_rule_lines_before_first_header_are_ignored() {
        let text = "\n==========\n   CPU INFORMATION\n==========\nName: X\n";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title(), "CPU INFORMATION");
    }

    #[test]
    fn test_extract_properties_splits_at_first_colon() {
        let props = extract_properties(&["Path: C:\\Windows", "  Name :  Disk  "]);
        assert_eq!(props.get("Path").map(String::as_str), Some("C:\\Windows"));
        assert_eq!(props.get("Name").map(String::as_str), Some("Disk"));
    }

    #[test]
    fn test_extract_properties_skips_empty_keys_and_plain_lines() {
        let props = extract_properties(&["CPU INFORMATION", ": orphan", "======"]);
        assert!(props.is_empty());
    }

    #[test]
    fn test_repeated_key_keeps_last() {
        let props = extract_properties(&["Name: first", "Name: second"]);
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("Name").map(String::as_str), Some("second"));
    }
}
