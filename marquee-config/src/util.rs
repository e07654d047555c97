use std::time::Duration;

/// Parse a humantime duration (`"400ms"`, `"10s"`). Bare integers are
/// read as milliseconds.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(ms) = trimmed.parse::<u64>() {
        return Some(Duration::from_millis(ms));
    }
    humantime::parse_duration(trimmed).ok()
}

/// Trimmed, non-empty value or `None`.
pub fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
