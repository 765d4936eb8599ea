use chrono::{DateTime, Utc};

/// Formats seconds as `m:ss`, flooring sub-second precision.
pub fn clock(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Formats a [0, 1] score as a percentage with one decimal.
///
/// Display-only rounding; each value is formatted independently, never
/// normalized against its counterpart.
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Formats a value already on the 0-100 scale (history rows).
pub fn percent_scaled(value: f64) -> String {
    format!("{value:.1}%")
}

/// Formats a byte count in megabytes with two decimals.
pub fn megabytes(bytes: f64) -> String {
    format!("{:.2} MB", bytes / (1024.0 * 1024.0))
}

/// Formats an epoch-milliseconds timestamp like `Mar 5, 2026`.
pub fn short_date(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "N/A".into())
}

/// Month label for chart buckets, like `Mar`.
pub fn month_label(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|date| date.format("%b").to_string())
        .unwrap_or_else(|| "N/A".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_floors_and_pads() {
        assert_eq!(clock(0.0), "0:00");
        assert_eq!(clock(59.9), "0:59");
        assert_eq!(clock(61.0), "1:01");
        assert_eq!(clock(-3.0), "0:00");
    }

    #[test]
    fn percent_rounds_to_one_decimal_without_normalizing() {
        assert_eq!(percent(0.1234), "12.3%");
        assert_eq!(percent(0.8766), "87.7%");
        // 0.62 + 0.57 > 1 is displayed as-is.
        assert_eq!(percent(0.62), "62.0%");
        assert_eq!(percent(0.57), "57.0%");
    }

    #[test]
    fn megabytes_keeps_two_decimals() {
        assert_eq!(megabytes(100.0 * 1024.0 * 1024.0), "100.00 MB");
        assert_eq!(megabytes(1_572_864.0), "1.50 MB");
    }

    #[test]
    fn short_date_renders_epoch_millis() {
        // 2024-03-05T00:00:00Z
        assert_eq!(short_date(1_709_596_800_000), "Mar 5, 2024");
    }
}
