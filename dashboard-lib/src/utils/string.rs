use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize text by replacing control characters with spaces and collapsing whitespace
/// Newlines and tabs inside a spreadsheet cell become single spaces and the result is trimmed
pub fn collapse_whitespace(value: &str) -> String {
    return value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ");
}

/// Remove diacritical marks: decompose to NFD and drop the combining marks
/// "Categoría" becomes "Categoria", "Descripción" becomes "Descripcion"
pub fn strip_diacritics(value: &str) -> String {
    return value.nfd().filter(|c| !is_combining_mark(*c)).collect();
}

/// Escape text for inclusion in HTML element content or a quoted attribute
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
