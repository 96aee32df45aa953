use chrono::{DateTime, Utc};

/// Format a post's creation time relative to `now`, e.g. "5 minutes ago".
///
/// Absent, unparsable, or future timestamps all render as "just now" —
/// the feed never shows an error for a bad timestamp.
pub fn format_relative(created_at_ms: Option<u64>, now: DateTime<Utc>) -> String {
    let Some(ms) = created_at_ms else {
        return "just now".into();
    };
    let Ok(ms) = i64::try_from(ms) else {
        return "just now".into();
    };
    let Some(then) = DateTime::<Utc>::from_timestamp_millis(ms) else {
        return "just now".into();
    };

    let secs = (now - then).num_seconds();
    if secs < 60 {
        return "just now".into();
    }
    let minutes = secs / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }
    plural(hours / 24, "day")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn recent_is_just_now() {
        assert_eq!(format_relative(Some(1_000_000), at(1_030_000)), "just now");
    }

    #[test]
    fn minutes_and_hours() {
        let base = 1_700_000_000_000u64;
        assert_eq!(
            format_relative(Some(base), at(base as i64 + 60_000)),
            "1 minute ago"
        );
        assert_eq!(
            format_relative(Some(base), at(base as i64 + 5 * 60_000)),
            "5 minutes ago"
        );
        assert_eq!(
            format_relative(Some(base), at(base as i64 + 3 * 3_600_000)),
            "3 hours ago"
        );
        assert_eq!(
            format_relative(Some(base), at(base as i64 + 49 * 3_600_000)),
            "2 days ago"
        );
    }

    #[test]
    fn missing_or_future_is_just_now() {
        assert_eq!(format_relative(None, at(1_000)), "just now");
        // Clock skew: post claims a future timestamp.
        assert_eq!(format_relative(Some(2_000_000), at(1_000_000)), "just now");
        // Out of i64 range.
        assert_eq!(format_relative(Some(u64::MAX), at(1_000_000)), "just now");
    }
}
