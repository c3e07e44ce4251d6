use super::format_mss;
use std::time::Duration;

#[test]
fn format_mss_pads_seconds_only() {
    assert_eq!(format_mss(Duration::ZERO), "0:00");
    assert_eq!(format_mss(Duration::from_secs(5)), "0:05");
    assert_eq!(format_mss(Duration::from_millis(61_900)), "1:01");
    assert_eq!(format_mss(Duration::from_secs(60 * 12 + 34)), "12:34");
}
