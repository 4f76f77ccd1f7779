use crate::paragraph::Paragraph;

const CSV_HEADER: &str = "paragraph";

/// Quote a CSV field when it contains a delimiter, quote or line break.
pub fn csv_escape(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Render matched paragraphs as a single-column CSV document with a
/// `paragraph` header, one row per paragraph.
pub fn matched_paragraphs_csv(paragraphs: &[Paragraph]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for paragraph in paragraphs {
        out.push_str(&csv_escape(paragraph.as_str()));
        out.push('\n');
    }
    out
}
