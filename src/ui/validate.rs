//! Input checks and display helpers used by the orchestrator.

use crate::request::InputFormat;

/// Extensions accepted by the file picker (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: [&str; 3] = [".html", ".md", ".markdown"];

pub const INVALID_FILE_TYPE: &str =
    "Invalid file type. Please upload .html, .md, or .markdown files.";
pub const NO_FILE_SELECTED: &str = "Please select a file to convert";
pub const NO_TEXT_ENTERED: &str = "Please enter content to convert";

/// True when `name` ends with one of [`ALLOWED_EXTENSIONS`].
pub fn is_allowed_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    ALLOWED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Parse a width/height input; blank, non-numeric or zero yields `fallback`.
///
/// Leading digits are honoured (`"800px"` → 800), matching how number
/// inputs are usually coerced.
pub fn parse_dimension(raw: &str, fallback: u32) -> u32 {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => fallback,
    }
}

/// Human-readable size: `512 B`, `1.5 KB`, `2.0 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

/// Example text shown in the empty text box for each input format.
pub fn placeholder(format: InputFormat) -> &'static str {
    match format {
        InputFormat::Markdown => {
            "Paste your Markdown content here...

Example Markdown:
# Heading
**Bold text** and *italic text*
- List item 1
- List item 2"
        }
        InputFormat::Html => {
            "Paste your HTML content here...

Example HTML:
<!DOCTYPE html>
<html>
<head><title>Document</title></head>
<body>
    <h1>Heading</h1>
    <p>Paragraph text</p>
</body>
</html>"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_the_allowed_extensions() {
        for ok in ["a.html", "a.md", "a.markdown", "REPORT.MD", "Page.HTML", "x.y.Markdown"] {
            assert!(is_allowed_file(ok), "{ok} should be accepted");
        }
        for bad in ["a.htm", "a.txt", "a.pdf", "md", "a.md.bak", "a.mdx", "html", ""] {
            assert!(!is_allowed_file(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn dimension_parsing() {
        assert_eq!(parse_dimension("800", 1275), 800);
        assert_eq!(parse_dimension(" 640 ", 1275), 640);
        assert_eq!(parse_dimension("800px", 1275), 800);
        assert_eq!(parse_dimension("", 1275), 1275);
        assert_eq!(parse_dimension("abc", 1650), 1650);
        assert_eq!(parse_dimension("0", 1650), 1650);
        assert_eq!(parse_dimension("-5", 1650), 1650);
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2.0 MB");
    }

    #[test]
    fn placeholders_differ_by_format() {
        assert!(placeholder(InputFormat::Markdown).contains("# Heading"));
        assert!(placeholder(InputFormat::Html).contains("<h1>Heading</h1>"));
    }
}
