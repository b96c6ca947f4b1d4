use time::OffsetDateTime;

/// Format a byte count as a human-readable string (B, KB, MB, GB)
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    const GB: u64 = 1024 * 1024 * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Convert a Unix timestamp into a zip entry timestamp.
///
/// Zip (MS-DOS) timestamps cover 1980-01-01 through 2107-12-31 with two-second
/// resolution; anything outside that range is clamped to the nearest end.
pub fn zip_timestamp(timestamp: i64) -> zip::DateTime {
    OffsetDateTime::from_unix_timestamp(timestamp)
        .ok()
        .and_then(|dt| {
            if dt.year() < 1980 {
                return Some(zip::DateTime::default());
            }
            if dt.year() > 2107 {
                return zip::DateTime::from_date_and_time(2107, 12, 31, 23, 59, 58).ok();
            }
            zip::DateTime::from_date_and_time(
                dt.year() as u16,
                dt.month() as u8,
                dt.day(),
                dt.hour(),
                dt.minute(),
                dt.second(),
            )
            .ok()
        })
        .unwrap_or_default()
}
