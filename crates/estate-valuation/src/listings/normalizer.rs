/// Parse a dollar or area figure such as `$1,250,000` or `3,200 sqft`.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c.is_whitespace())
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '_' | ' '))
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Split a delimited amenity cell; `;` and `|` are both accepted.
pub(crate) fn split_amenities(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ';' || c == '|')
        .map(collapse_whitespace)
        .filter(|amenity| !amenity.is_empty())
        .collect()
}

pub(crate) fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
