//! Common display utilities and helpers

use chrono::{DateTime, Utc};

/// Placeholder for missing values
pub const MISSING: &str = "--";

/// Truncate string to max characters with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an RFC 3339 timestamp as `YYYY-MM-DD HH:MM`, or return it as-is
pub fn format_timestamp(timestamp: &str) -> String {
    match timestamp.parse::<DateTime<Utc>>() {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Short form of a digest: first 12 hex characters after the algorithm
pub fn short_digest(digest: &str) -> String {
    let hex = digest.split_once(':').map_or(digest, |(_, hex)| hex);
    hex.chars().take(12).collect()
}

/// Human-readable byte count from the server's decimal string
pub fn format_size(size: &str) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let Ok(bytes) = size.parse::<u64>() else {
        return size.to_string();
    };

    if bytes < 1000 {
        return format!("{} {}", bytes, UNITS[0]);
    }

    // Round to tenths in integers, and only move up a unit once the
    // rounded value reaches 1000
    let mut unit = 1;
    let mut divisor: u128 = 1000;
    let tenths = loop {
        let tenths = (u128::from(bytes) * 10 + divisor / 2) / divisor;
        if tenths < 10_000 || unit == UNITS.len() - 1 {
            break tenths;
        }
        unit += 1;
        divisor *= 1000;
    };

    format!("{}.{} {}", tenths / 10, tenths % 10, UNITS[unit])
}
