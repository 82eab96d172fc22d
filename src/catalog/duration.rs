//! Course duration formatting.

/// Format a duration in minutes for display.
///
/// # Examples
/// ```ignore
/// assert_eq!(minutes_to_human(Some(90)), "1h 30m");
/// assert_eq!(minutes_to_human(Some(120)), "2h");
/// assert_eq!(minutes_to_human(Some(45)), "45m");
/// assert_eq!(minutes_to_human(None), "N/A");
/// ```
pub fn minutes_to_human(minutes: Option<u32>) -> String {
    let Some(m) = minutes.filter(|&m| m > 0) else {
        return "N/A".to_string();
    };
    match (m / 60, m % 60) {
        (0, mm) => format!("{mm}m"),
        (h, 0) => format!("{h}h"),
        (h, mm) => format!("{h}h {mm}m"),
    }
}
