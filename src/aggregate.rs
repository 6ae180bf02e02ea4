use crate::types::report::{BestSlot, BestTimes, ScoredSlot};

/// Group slots by calendar date and keep the lowest score per date.
///
/// Each bucket starts at `BestSlot::unset()`. Comparison is strict, so on a
/// tie the slot seen first stays; with a time-ordered forecast that is the
/// earliest one.
pub fn select_best_per_day(slots: &[ScoredSlot]) -> BestTimes {
    let mut best = BestTimes::new();
    for slot in slots {
        let current = best.entry(slot.date).or_insert_with(BestSlot::unset);
        if slot.score < current.score {
            *current = BestSlot {
                time: Some(slot.time),
                score: slot.score,
            };
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::report::{date_label, NO_SLOT_SCORE};
    use chrono::{NaiveDate, NaiveTime};

    fn slot(month: u32, day: u32, hour: u32, score: f64) -> ScoredSlot {
        ScoredSlot::new(
            NaiveDate::from_ymd_opt(2024, month, day).expect("valid date"),
            NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time"),
            score,
        )
    }

    #[test]
    fn picks_minimum_per_date() {
        let slots = [slot(6, 1, 6, 5.0), slot(6, 1, 14, 99.0), slot(6, 2, 7, 3.0)];

        let best = select_best_per_day(&slots);
        let rendered: Vec<_> = best
            .iter()
            .map(|(date, slot)| (date_label(date), slot.time_label(), slot.score))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("06/01/2024".to_string(), "06:00:00".to_string(), 5.0),
                ("06/02/2024".to_string(), "07:00:00".to_string(), 3.0),
            ]
        );
    }

    #[test]
    fn ties_keep_first_encountered_slot() {
        let slots = [slot(6, 1, 3, 7.5), slot(6, 1, 21, 7.5), slot(6, 1, 23, 7.5)];
        let best = select_best_per_day(&slots);
        let winner = best.values().next().expect("one day");
        assert_eq!(winner.time, NaiveTime::from_hms_opt(3, 0, 0));
    }

    #[test]
    fn all_excluded_day_still_reports_least_bad_slot() {
        let slots = [slot(6, 3, 9, 104.0), slot(6, 3, 12, 101.5), slot(6, 3, 15, 103.0)];
        let best = select_best_per_day(&slots);
        let winner = best.values().next().expect("one day");
        assert_eq!(winner.time, NaiveTime::from_hms_opt(12, 0, 0));
        assert_eq!(winner.score, 101.5);
        assert!(winner.is_excluded());
    }

    #[test]
    fn scores_at_or_above_start_value_leave_bucket_unset() {
        let best = select_best_per_day(&[slot(6, 4, 12, NO_SLOT_SCORE)]);
        let winner = best.values().next().expect("bucket exists");
        assert_eq!(*winner, BestSlot::unset());
    }

    #[test]
    fn dates_order_chronologically_across_year_boundary() {
        let slots = [
            ScoredSlot::new(
                NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date"),
                NaiveTime::from_hms_opt(21, 0, 0).expect("valid time"),
                4.0,
            ),
            ScoredSlot::new(
                NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
                NaiveTime::from_hms_opt(0, 0, 0).expect("valid time"),
                6.0,
            ),
        ];
        let labels: Vec<_> = select_best_per_day(&slots).keys().map(date_label).collect();
        assert_eq!(labels, vec!["12/31/2024", "01/01/2025"]);
    }

    #[test]
    fn empty_input_yields_no_days() {
        assert!(select_best_per_day(&[]).is_empty());
    }
}
