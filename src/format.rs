//! Human-readable view counts

/// Format a raw view count as it arrives from the API (a decimal string)
///
/// Anything that is not a non-negative integer renders as `"0 views"`.
pub fn format_views(raw: &str) -> String {
    match parse_view_count(raw) {
        Some(count) => format_count(count),
        None => "0 views".to_string(),
    }
}

/// Parse a view count, tolerating surrounding whitespace
pub fn parse_view_count(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

/// Format a numeric view count: `1.2M views`, `3.4K views` or `999 views`
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M views", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K views", count as f64 / 1_000.0)
    } else {
        format!("{} views", count)
    }
}
