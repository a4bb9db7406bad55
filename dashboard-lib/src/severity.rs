use calamine::Data;

/// Parse a severity written with dot thousands separators and a decimal comma.
///
/// Every `.` is dropped first, then `,` becomes the decimal point: "1.234,5"
/// gives 1234.5. Anything that still fails to parse, or parses to a
/// non-finite value, is missing rather than an error.
pub fn parse_locale_number(text: &str) -> Option<f64> {
    let cleaned = text.replace('.', "").replace(',', ".");
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Numeric severity of a cell. Numeric cells pass through unchanged,
/// text cells go through [`parse_locale_number`].
pub fn coerce_severity(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) if f.is_finite() => Some(*f),
        Data::Float(_) => None,
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => parse_locale_number(s),
        Data::Bool(_)
        | Data::DateTime(_)
        | Data::DateTimeIso(_)
        | Data::DurationIso(_)
        | Data::Error(_)
        | Data::Empty => None,
    }
}
