//! Elapsed/total time text

/// Format seconds as zero-padded `MM:SS`
///
/// Unknown positions (NaN, infinite, negative) render as `00:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }

    let whole = seconds.floor() as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

/// Format the `elapsed / total` label
pub fn format_progress(current: f64, duration: f64) -> String {
    format!("{} / {}", format_time(current), format_time(duration))
}
