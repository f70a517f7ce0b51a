use beacon_types::{TimeMode, TimeWindow};
use chrono::{DateTime, Datelike, Days, FixedOffset, Local, NaiveDate, NaiveTime, TimeDelta};

/// Resolve `mode` against `now`, keeping `now`'s UTC offset for calendar boundaries.
pub fn resolve_window(mode: TimeMode, now: DateTime<FixedOffset>) -> TimeWindow {
    let until_now = |days: i64| TimeWindow {
        start: now - TimeDelta::days(days),
        end: now,
        end_inclusive: true,
    };

    match mode {
        TimeMode::LastWeek => until_now(7),
        TimeMode::Last4Weeks => until_now(28),
        TimeMode::Last30Days => until_now(30),
        TimeMode::MonthToDate => TimeWindow {
            start: midnight(first_of_month(now.date_naive()), *now.offset()),
            end: now,
            end_inclusive: true,
        },
        TimeMode::LastMonth => {
            let this_month = first_of_month(now.date_naive());
            let previous_month = first_of_month(this_month - Days::new(1));
            TimeWindow {
                start: midnight(previous_month, *now.offset()),
                end: midnight(this_month, *now.offset()) - TimeDelta::seconds(1),
                end_inclusive: false,
            }
        }
    }
}

/// Resolve against the local clock.
pub fn resolve_window_now(mode: TimeMode) -> TimeWindow {
    resolve_window(mode, Local::now().fixed_offset())
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

fn midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<FixedOffset> {
    let local = date.and_time(NaiveTime::MIN);
    let utc = local - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_testing::fixtures::fixed;

    fn bounds(window: &TimeWindow) -> (String, String) {
        (
            window.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            window.end.format("%Y-%m-%dT%H:%M:%S").to_string(),
        )
    }

    #[test]
    fn test_last_month_rolls_into_leap_february() {
        let window = resolve_window(TimeMode::LastMonth, fixed("2024-03-15T12:00:00Z"));
        assert_eq!(
            bounds(&window),
            (
                "2024-02-01T00:00:00".to_string(),
                "2024-02-29T23:59:59".to_string()
            )
        );
        assert!(!window.end_inclusive);
    }

    #[test]
    fn test_last_month_crosses_year_boundary() {
        let window = resolve_window(TimeMode::LastMonth, fixed("2025-01-03T08:00:00+02:00"));
        assert_eq!(
            bounds(&window),
            (
                "2024-12-01T00:00:00".to_string(),
                "2024-12-31T23:59:59".to_string()
            )
        );
        assert_eq!(window.start.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn test_month_to_date() {
        let now = fixed("2024-07-10T09:00:00Z");
        let window = resolve_window(TimeMode::MonthToDate, now);
        assert_eq!(
            bounds(&window),
            (
                "2024-07-01T00:00:00".to_string(),
                "2024-07-10T09:00:00".to_string()
            )
        );
        assert!(window.end_inclusive);
        assert!(window.contains(&now));
    }

    #[test]
    fn test_rolling_windows() {
        let now = fixed("2024-03-31T18:30:00Z");
        let cases = [
            (TimeMode::LastWeek, "2024-03-24T18:30:00"),
            (TimeMode::Last4Weeks, "2024-03-03T18:30:00"),
            (TimeMode::Last30Days, "2024-03-01T18:30:00"),
        ];
        for (mode, start) in cases {
            let window = resolve_window(mode, now);
            assert_eq!(bounds(&window).0, start, "{:?}", mode);
            assert_eq!(window.end, now);
        }
    }

    #[test]
    fn test_start_never_after_end() {
        let instants = [
            "2024-01-01T00:00:00Z",
            "2024-02-29T23:59:59Z",
            "2023-12-31T23:59:59-05:00",
            "2024-07-01T00:00:00+09:00",
        ];
        for instant in instants {
            let now = fixed(instant);
            for mode in TimeMode::ALL {
                let window = resolve_window(mode, now);
                assert!(window.start <= window.end, "{:?} at {}", mode, instant);
            }
        }
    }

    #[test]
    fn test_last_month_excludes_current_month() {
        for instant in ["2024-01-01T00:00:00Z", "2024-03-31T23:59:59Z", "2024-12-15T10:00:00Z"] {
            let now = fixed(instant);
            let window = resolve_window(TimeMode::LastMonth, now);
            assert_ne!(
                (window.end.year(), window.end.month()),
                (now.year(), now.month())
            );
        }
    }
}
