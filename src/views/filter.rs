//! Client-side filtering helpers shared by the list views.

/// True when every whitespace-separated term of `query` appears in at least
/// one of `fields`, ignoring case. A blank query matches everything.
pub fn matches_search(query: &str, fields: &[Option<&str>]) -> bool {
    let haystacks: Vec<String> = fields.iter().flatten().map(|f| f.to_lowercase()).collect();
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .all(|term| haystacks.iter().any(|h| h.contains(&term)))
}

/// True when no value is expected, or `actual` equals it ignoring case.
pub fn matches_exact(expected: Option<&str>, actual: Option<&str>) -> bool {
    match expected.map(str::trim).filter(|e| !e.is_empty()) {
        None => true,
        Some(expected) => actual.is_some_and(|a| a.trim().eq_ignore_ascii_case(expected)),
    }
}

/// Query parameter value for an optional filter field.
pub fn param<T: ToString>(value: Option<&T>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}
