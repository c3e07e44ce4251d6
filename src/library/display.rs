use std::time::Duration;

/// Format a `Duration` as `M:SS` (minutes are not padded, seconds are).
pub fn format_mss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
