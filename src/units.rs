//! Size formatting helpers for summary output.

/// Formats a byte count as a short human-readable string (`1.5G`, `0B`).
/// 1024-based, one decimal place, matching the dashboard's summary lines.
pub fn humanize_bytes(value: f64) -> String {
    if value == 0.0 {
        return "0B".to_string();
    }
    const SUFFIXES: [&str; 9] = ["B", "K", "M", "G", "T", "P", "E", "Z", "Y"];
    let mut value = value;
    let mut i = 0;
    while value >= 1024.0 && i < SUFFIXES.len() - 1 {
        value /= 1024.0;
        i += 1;
    }
    format!("{value:.1}{}", SUFFIXES[i])
}
