//! Human-readable formatting of durations and byte sizes.

/// Format a duration in whole seconds as `H:MM:SS`, or `M:SS` when it is
/// under an hour.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Format a byte count with a binary-scaled unit, at most two decimal
/// places, and no trailing zeros. Sizes at or beyond a gigabyte stay in
/// GB.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let exponent = (bytes.ilog(1024) as usize).min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    let mut value = format!("{scaled:.2}");
    if value.contains('.') {
        value.truncate(value.trim_end_matches('0').trim_end_matches('.').len());
    }
    format!("{value} {unit}", unit = UNITS[exponent])
}
