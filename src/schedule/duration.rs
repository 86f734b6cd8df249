//! Shift length in hours

use chrono::{Datelike, NaiveDate, Weekday};

use super::codes::normalize_code;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Weekend morning shifts are contractually fixed to this window
const WEEKEND_MORNING: (&str, &str) = ("07:30", "14:30");

/// Parse `HH:MM` or `HH:MM:SS` into minutes since midnight. Seconds are ignored.
/// `24:00` is accepted as end of day; any later time is rejected.
pub fn parse_minutes(time: &str) -> Option<u32> {
    let mut parts = time.trim().split(':');
    let hours: u32 = parts.next()?.trim().parse().ok()?;
    let minutes: u32 = parts.next()?.trim().parse().ok()?;
    if minutes > 59 || hours > 24 || (hours == 24 && minutes > 0) {
        return None;
    }
    Some(hours * 60 + minutes)
}

fn is_morning_shift(code: &str) -> bool {
    matches!(normalize_code(code).as_str(), "P" | "PAGI")
}

fn falls_on_weekend(date: &str) -> bool {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .unwrap_or(false)
}

/// Hours between two times of day.
///
/// An end before the start is an overnight shift. A morning shift (`P` or
/// `PAGI`) dated on a Saturday or Sunday always runs 07:30-14:30, whatever
/// times are passed. Missing or unreadable times give 0.
pub fn calculate_shift_hours(
    start: Option<&str>,
    end: Option<&str>,
    shift_code: Option<&str>,
    date: Option<&str>,
) -> f64 {
    let (mut start, mut end) = match (start, end) {
        (Some(s), Some(e)) if !s.trim().is_empty() && !e.trim().is_empty() => (s, e),
        _ => return 0.0,
    };

    if let (Some(code), Some(date)) = (shift_code, date) {
        if is_morning_shift(code) && falls_on_weekend(date) {
            start = WEEKEND_MORNING.0;
            end = WEEKEND_MORNING.1;
        }
    }

    let (start_minutes, mut end_minutes) = match (parse_minutes(start), parse_minutes(end)) {
        (Some(s), Some(e)) => (s, e),
        _ => {
            tracing::warn!(start, end, "unreadable shift times, counting 0 hours");
            return 0.0;
        }
    };

    if end_minutes < start_minutes {
        end_minutes += MINUTES_PER_DAY;
    }

    f64::from(end_minutes - start_minutes) / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("07:30"), Some(450));
        assert_eq!(parse_minutes("21:00:59"), Some(1260));
        assert_eq!(parse_minutes("7"), None);
        assert_eq!(parse_minutes("ab:cd"), None);
        assert_eq!(parse_minutes("10:75"), None);
    }

    #[test]
    fn test_day_shift() {
        assert_eq!(calculate_shift_hours(Some("07:00"), Some("14:00"), None, None), 7.0);
    }

    #[test]
    fn test_overnight_wrap() {
        assert_eq!(calculate_shift_hours(Some("21:00"), Some("07:00"), None, None), 10.0);
        assert_eq!(calculate_shift_hours(Some("14:00"), Some("07:00"), None, None), 17.0);
    }

    #[test]
    fn test_missing_times() {
        assert_eq!(calculate_shift_hours(None, Some("07:00"), None, None), 0.0);
        assert_eq!(calculate_shift_hours(Some("07:00"), None, None, None), 0.0);
        assert_eq!(calculate_shift_hours(Some(""), Some("07:00"), None, None), 0.0);
    }

    #[test]
    fn test_weekend_morning_override() {
        // 2024-06-01 is a Saturday, 2024-06-02 a Sunday
        assert_eq!(
            calculate_shift_hours(Some("07:00"), Some("14:00"), Some("P"), Some("2024-06-01")),
            7.0
        );
        assert_eq!(
            calculate_shift_hours(Some("06:00"), Some("18:00"), Some(" pagi"), Some("2024-06-02")),
            7.0
        );
    }

    #[test]
    fn test_weekday_morning_keeps_times() {
        // 2024-06-03 is a Monday
        assert_eq!(
            calculate_shift_hours(Some("07:00"), Some("14:30"), Some("P"), Some("2024-06-03")),
            7.5
        );
    }

    #[test]
    fn test_weekend_other_shift_keeps_times() {
        assert_eq!(
            calculate_shift_hours(Some("14:00"), Some("21:00"), Some("S"), Some("2024-06-01")),
            7.0
        );
        assert_eq!(
            calculate_shift_hours(Some("21:00"), Some("07:00"), Some("MALAM"), Some("2024-06-01")),
            10.0
        );
    }

    #[test]
    fn test_equal_times_is_zero() {
        assert_eq!(calculate_shift_hours(Some("00:00"), Some("00:00"), Some("OFF"), None), 0.0);
    }

    #[test]
    fn test_unreadable_times() {
        assert_eq!(calculate_shift_hours(Some("pagi"), Some("14:00"), None, None), 0.0);
        assert_eq!(calculate_shift_hours(Some("21:00"), Some("24:59"), None, None), 0.0);
    }

    #[test]
    fn test_midnight_as_end_of_day() {
        assert_eq!(parse_minutes("24:00"), Some(MINUTES_PER_DAY));
        assert_eq!(parse_minutes("24:01"), None);
        assert_eq!(parse_minutes("25:00"), None);
        assert_eq!(calculate_shift_hours(Some("17:00"), Some("24:00"), None, None), 7.0);
    }
}
