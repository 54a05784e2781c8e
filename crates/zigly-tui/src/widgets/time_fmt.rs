//! Compact "time since last contact" formatting for table cells.
//! The detail panel uses `humantime` for the long form instead.

/// Format elapsed seconds as a compact age (e.g., "now", "42s", "5m",
/// "4h 23m", "3d").
pub fn fmt_ago(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;

    if secs < 10 {
        "now".to_owned()
    } else if secs < 60 {
        format!("{secs}s")
    } else if hours == 0 && days == 0 {
        format!("{minutes}m")
    } else if days == 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{days}d")
    }
}
