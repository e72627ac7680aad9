//! LinkedIn profile URL shape validation.

/// Parse a candidate personal-profile URL, returning the handle.
///
/// Accepted shape: `http(s)://`, optional `www.` subdomain,
/// `linkedin.com/in/`, a handle of word characters, hyphens, underscores or
/// percent-escapes, and an optional trailing slash. Anything else is
/// rejected.
pub fn parse_profile_url(candidate: &str) -> Option<&str> {
    let rest = candidate
        .strip_prefix("https://")
        .or_else(|| candidate.strip_prefix("http://"))?;

    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    let rest = rest.strip_prefix("linkedin.com/in/")?;
    let handle = rest.strip_suffix('/').unwrap_or(rest);

    if handle.is_empty() {
        return None;
    }

    handle
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '%'))
        .then_some(handle)
}

/// Whether the candidate is a well-formed personal-profile URL.
pub fn is_valid_profile_url(candidate: &str) -> bool {
    parse_profile_url(candidate).is_some()
}
