/// Extracts the numeric ID from a CWE identifier such as `CWE-79`.
///
/// A bare number is accepted too. Anything else yields `None`; there is no
/// zero placeholder for a missing or unreadable weakness.
pub fn parse_cwe(value: &str) -> Option<u32> {
    let value = value.trim();
    let digits = match value.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("CWE-") => &value[4..],
        _ => value,
    };
    digits.parse().ok()
}

/// Parses every readable CWE in `values`, dropping the rest
pub fn parse_cwes<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<u32> {
    values.into_iter().filter_map(parse_cwe).collect()
}
