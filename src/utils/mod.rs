use std::time::Duration;

/// Format a duration as `M:SS`, rounding partial seconds up so a countdown
/// never shows 0:00 while time is still left
pub fn format_countdown(duration: Duration) -> String {
    let mut total_secs = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        total_secs += 1;
    }
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Text progress bar such as `[#####-----]`; `progress` is clamped to 0..=1
pub fn progress_bar(progress: f64, width: usize) -> String {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let filled = ((width as f64) * progress).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Escape text for use inside a double-quoted AppleScript string literal
pub fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
