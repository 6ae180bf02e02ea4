use crate::types::report::{Score, EXCLUDED_SLOT_SCORE};
use chrono::{DateTime, Datelike, FixedOffset, Timelike};

const fn clock(hours: u32, minutes: u32) -> u32 {
    hours * 3600 + minutes * 60
}

const DAWN: u32 = clock(5, 30);
const MORNING_END: u32 = clock(7, 30);
const DAYTIME_END: u32 = clock(18, 30);
const LATE_NIGHT_START: u32 = clock(21, 0);
const EVENING_END: u32 = clock(21, 30);

/// Score the local clock time of a slot. Intervals are half-open on the
/// left; weekday daytime gets `EXCLUDED_SLOT_SCORE`.
///
/// Exactly 05:30:00 matches no interval and also falls through to
/// `EXCLUDED_SLOT_SCORE`.
pub fn time_of_day_score(timestamp: &DateTime<FixedOffset>, prefer_early: bool) -> Score {
    let secs = timestamp.time().num_seconds_from_midnight();

    let score = if secs < DAWN {
        9.0
    } else if secs > DAWN && secs <= MORNING_END {
        5.0
    } else if secs > MORNING_END && secs <= DAYTIME_END {
        if timestamp.weekday().num_days_from_monday() < 5 {
            EXCLUDED_SLOT_SCORE
        } else {
            4.0
        }
    } else if secs > DAYTIME_END && secs <= EVENING_END {
        2.0
    } else if secs > LATE_NIGHT_START {
        8.0
    } else {
        EXCLUDED_SLOT_SCORE
    };

    if prefer_early {
        (score - 10.0).abs()
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // 2024-06-03 is a Monday, 2024-06-01 a Saturday.
    fn at(day: u32, hour: u32, minute: u32, second: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("utc offset")
            .with_ymd_and_hms(2024, 6, day, hour, minute, second)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn night_and_morning_boundaries() {
        assert_eq!(time_of_day_score(&at(3, 0, 0, 0), false), 9.0);
        assert_eq!(time_of_day_score(&at(3, 5, 29, 59), false), 9.0);
        assert_eq!(time_of_day_score(&at(3, 5, 30, 1), false), 5.0);
        assert_eq!(time_of_day_score(&at(3, 7, 30, 0), false), 5.0);
    }

    #[test]
    fn exactly_dawn_falls_through_to_excluded() {
        assert_eq!(time_of_day_score(&at(3, 5, 30, 0), false), EXCLUDED_SLOT_SCORE);
        assert_eq!(time_of_day_score(&at(1, 5, 30, 0), false), EXCLUDED_SLOT_SCORE);
    }

    #[test]
    fn weekday_daytime_is_excluded() {
        assert_eq!(time_of_day_score(&at(3, 7, 30, 1), false), EXCLUDED_SLOT_SCORE);
        assert_eq!(time_of_day_score(&at(3, 12, 0, 0), false), EXCLUDED_SLOT_SCORE);
        assert_eq!(time_of_day_score(&at(7, 18, 30, 0), false), EXCLUDED_SLOT_SCORE);
    }

    #[test]
    fn weekend_daytime_is_acceptable() {
        assert_eq!(time_of_day_score(&at(1, 12, 0, 0), false), 4.0);
        assert_eq!(time_of_day_score(&at(2, 18, 30, 0), false), 4.0);
    }

    #[test]
    fn evening_window_shadows_late_night_overlap() {
        assert_eq!(time_of_day_score(&at(3, 18, 30, 1), false), 2.0);
        assert_eq!(time_of_day_score(&at(3, 21, 0, 0), false), 2.0);
        assert_eq!(time_of_day_score(&at(3, 21, 15, 0), false), 2.0);
        assert_eq!(time_of_day_score(&at(3, 21, 30, 0), false), 2.0);
        assert_eq!(time_of_day_score(&at(3, 21, 30, 1), false), 8.0);
        assert_eq!(time_of_day_score(&at(3, 23, 59, 59), false), 8.0);
    }

    #[test]
    fn prefer_early_mirrors_around_ten() {
        assert_eq!(time_of_day_score(&at(3, 3, 0, 0), true), 1.0);
        assert_eq!(time_of_day_score(&at(3, 6, 0, 0), true), 5.0);
        assert_eq!(time_of_day_score(&at(3, 20, 0, 0), true), 8.0);
        assert_eq!(time_of_day_score(&at(3, 12, 0, 0), true), 89.0);
    }
}
