/// Completes a possibly relative media path against the API base.
///
/// Absolute http(s) URLs pass through, a leading `/` is appended to the base
/// as-is, and anything else is joined with a single `/`. Blank input has no
/// URL.
pub fn complete_url(api_base: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if is_absolute_http(path) {
        return Some(path.to_string());
    }
    let base = api_base.trim().trim_end_matches('/');
    if path.starts_with('/') {
        Some(format!("{base}{path}"))
    } else {
        Some(format!("{base}/{path}"))
    }
}

/// Scheme prefix only; the rest of the URL is not validated.
fn is_absolute_http(path: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        path.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
