use chrono::{DateTime, FixedOffset};

/// Converts a unix timestamp into the display zone.
/// Timestamps chrono can't represent fall back to the epoch; ingestion rejects those upstream.
fn local_time(timestamp: i64, zone: &FixedOffset) -> DateTime<FixedOffset> {
    DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .with_timezone(zone)
}

/// Short weekday name, e.g. "Mon"
///
/// # Arguments
///
/// * 'timestamp' - seconds since epoch
/// * 'zone' - display zone
pub fn format_day_label(timestamp: i64, zone: &FixedOffset) -> String {
    local_time(timestamp, zone).format("%a").to_string()
}

/// Calendar day key used for grouping, e.g. "Mon, Jan 15"
///
/// Two timestamps belong to the same forecast day if and only if their keys are equal.
///
/// # Arguments
///
/// * 'timestamp' - seconds since epoch
/// * 'zone' - display zone
pub fn format_date_key(timestamp: i64, zone: &FixedOffset) -> String {
    local_time(timestamp, zone).format("%a, %b %-d").to_string()
}

/// Two-digit clock time, e.g. "09:00 AM"
///
/// # Arguments
///
/// * 'timestamp' - seconds since epoch
/// * 'zone' - display zone
pub fn format_clock_time(timestamp: i64, zone: &FixedOffset) -> String {
    local_time(timestamp, zone).format("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-15T09:00:00Z, a Monday
    const MONDAY_9AM: i64 = 1_705_309_200;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_day_label() {
        assert_eq!(format_day_label(MONDAY_9AM, &utc()), "Mon");
    }

    #[test]
    fn test_date_key() {
        assert_eq!(format_date_key(MONDAY_9AM, &utc()), "Mon, Jan 15");
    }

    #[test]
    fn test_date_key_single_digit_day() {
        // 2024-02-05T12:00:00Z
        assert_eq!(format_date_key(1_707_134_400, &utc()), "Mon, Feb 5");
    }

    #[test]
    fn test_clock_time() {
        assert_eq!(format_clock_time(MONDAY_9AM, &utc()), "09:00 AM");
        assert_eq!(format_clock_time(MONDAY_9AM + 6 * 3600, &utc()), "03:00 PM");
    }

    #[test]
    fn test_zone_shifts_day() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        // 2024-01-15T21:00:00Z is already Tuesday in Tokyo
        let ts = MONDAY_9AM + 12 * 3600;
        assert_eq!(format_date_key(ts, &utc()), "Mon, Jan 15");
        assert_eq!(format_date_key(ts, &tokyo), "Tue, Jan 16");
        assert_eq!(format_day_label(ts, &tokyo), "Tue");
        assert_eq!(format_clock_time(ts, &tokyo), "06:00 AM");
    }

    #[test]
    fn test_out_of_range_falls_back_to_epoch() {
        assert_eq!(format_date_key(i64::MAX, &utc()), "Thu, Jan 1");
    }
}
