//! Small text helpers shared by every layer.

/// Longest prefix of `s` that fits in `max_bytes` and ends on a char boundary.
///
/// Used to keep log lines and error bodies bounded.
///
/// ```
/// use huddle_domain::util::truncate_str;
///
/// assert_eq!(truncate_str("🏈 kickoff", 6), "🏈 k");
/// ```
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let end = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= max_bytes)
        .last()
        .unwrap_or(0);
    &s[..end]
}
