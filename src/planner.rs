use crate::aggregate::select_best_per_day;
use crate::error::Result;
use crate::forecast::normalize::normalize;
use crate::forecast::RawForecastEntry;
use crate::scoring::{self, ScoreBreakdown};
use crate::types::observation::{Preferences, WeatherObservation};
use crate::types::report::{BestTimes, ScoredSlot};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Plan {
    pub best: BestTimes,
    pub scored: usize,
    pub skipped: usize,
}

/// Score every forecast entry and pick the best slot per day. Entries that
/// fail to parse or normalize are logged and skipped; they never abort the plan.
pub fn plan_best_times(entries: &[Value], prefs: &Preferences, offset: FixedOffset) -> Plan {
    let mut slots = Vec::with_capacity(entries.len());
    let mut skipped = 0;

    for (index, entry) in entries.iter().enumerate() {
        match observe(entry, offset) {
            Ok(observation) => {
                let timestamp = observation.timestamp();
                slots.push(ScoredSlot::new(
                    timestamp.date_naive(),
                    timestamp.time(),
                    scoring::score(&observation, prefs),
                ));
            }
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping forecast entry");
                skipped += 1;
            }
        }
    }

    Plan {
        best: select_best_per_day(&slots),
        scored: slots.len(),
        skipped,
    }
}

fn observe(entry: &Value, offset: FixedOffset) -> Result<WeatherObservation> {
    let raw = RawForecastEntry::deserialize(entry)?;
    normalize(&raw, offset)
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentScore {
    pub observation: WeatherObservation,
    pub breakdown: ScoreBreakdown,
}

/// Score the current conditions as a single slot.
pub fn score_current(
    entry: &RawForecastEntry,
    prefs: &Preferences,
    offset: FixedOffset,
) -> Result<CurrentScore> {
    let observation = normalize(entry, offset)?;
    let breakdown = scoring::breakdown(&observation, prefs);
    Ok(CurrentScore {
        observation,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuncastError;
    use crate::forecast::{RawCondition, RawMain, RawWind};
    use crate::types::report::{date_label, EXCLUDED_SLOT_SCORE};
    use serde_json::json;

    // 2024-06-01T00:00:00Z, a Saturday
    const SATURDAY: i64 = 1717200000;
    const HOUR: i64 = 3600;
    const DAY: i64 = 24 * HOUR;

    fn raw_entry(dt: i64, main: &str, description: &str) -> RawForecastEntry {
        RawForecastEntry {
            dt: Some(dt),
            main: Some(RawMain {
                temp: Some(58.0),
                humidity: Some(60.0),
            }),
            wind: Some(RawWind { speed: Some(6.5) }),
            weather: vec![RawCondition {
                main: Some(main.to_string()),
                description: description.to_string(),
            }],
            rain: None,
            snow: None,
        }
    }

    fn entry(dt: i64, main: &str, description: &str) -> Value {
        serde_json::to_value(raw_entry(dt, main, description)).expect("entry should serialize")
    }

    /// Five days of three-hourly slots starting Saturday midnight.
    fn five_day_forecast() -> Vec<Value> {
        (0..40)
            .map(|step| entry(SATURDAY + step * 3 * HOUR, "Clouds", "broken clouds"))
            .collect()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).expect("utc offset")
    }

    #[test]
    fn five_day_forecast_yields_one_best_slot_per_day() {
        let plan = plan_best_times(&five_day_forecast(), &Preferences::default(), utc());

        assert_eq!(plan.skipped, 0);
        assert_eq!(plan.scored, 40);
        let days: Vec<_> = plan.best.keys().map(date_label).collect();
        assert_eq!(
            days,
            vec!["06/01/2024", "06/02/2024", "06/03/2024", "06/04/2024", "06/05/2024"]
        );
        for slot in plan.best.values() {
            assert!(!slot.is_excluded());
            assert!(slot.time.is_some());
        }
    }

    #[test]
    fn weekday_best_slot_avoids_excluded_window() {
        let plan = plan_best_times(&five_day_forecast(), &Preferences::default(), utc());
        let monday = plan
            .best
            .iter()
            .find(|(date, _)| date_label(date) == "06/03/2024")
            .map(|(_, slot)| *slot)
            .expect("monday should be present");
        // 21:00 falls in the evening window, the cheapest band
        assert_eq!(monday.time_label(), "21:00:00");
        assert!(monday.score < EXCLUDED_SLOT_SCORE);
    }

    #[test]
    fn weekday_with_only_daytime_slots_reports_least_bad_slot() {
        let monday = SATURDAY + 2 * DAY;
        let entries = vec![
            entry(monday + 9 * HOUR, "Rain", "heavy rain"),
            entry(monday + 12 * HOUR, "Clouds", "overcast clouds"),
            entry(monday + 15 * HOUR, "Clear", "clear sky"),
        ];

        let plan = plan_best_times(&entries, &Preferences::default(), utc());
        let slot = plan.best.values().next().expect("one day");
        assert_eq!(slot.time_label(), "12:00:00");
        assert!(slot.is_excluded());
    }

    #[test]
    fn bad_entries_are_skipped_without_affecting_other_days() {
        let mut entries = five_day_forecast();
        entries[3]["dt"] = Value::Null;
        entries[10] = json!({});

        let plan = plan_best_times(&entries, &Preferences::default(), utc());
        assert_eq!(plan.skipped, 2);
        assert_eq!(plan.scored, 38);
        assert_eq!(plan.best.len(), 5);
    }

    #[test]
    fn condition_without_category_is_skipped_alone() {
        let mut entries = five_day_forecast();
        entries[1]["weather"] = json!([{"description": "clear sky"}]);

        let plan = plan_best_times(&entries, &Preferences::default(), utc());
        assert_eq!(plan.skipped, 1);
        assert_eq!(plan.scored, 39);
        assert_eq!(plan.best.len(), 5);
    }

    #[test]
    fn wrongly_typed_fields_are_skipped_per_entry() {
        let mut entries = five_day_forecast();
        entries[0]["main"]["humidity"] = json!("60");
        entries[8]["weather"] = Value::Null;

        let plan = plan_best_times(&entries, &Preferences::default(), utc());
        assert_eq!(plan.skipped, 2);
        assert_eq!(plan.scored, 38);
        assert_eq!(plan.best.len(), 5);
    }

    #[test]
    fn city_offset_moves_slots_between_days() {
        // 02:00 UTC Sunday is still Saturday evening in New York
        let entries = vec![entry(SATURDAY + DAY + 2 * HOUR, "Clear", "clear sky")];
        let new_york = FixedOffset::west_opt(4 * 3600).expect("valid offset");

        let plan = plan_best_times(&entries, &Preferences::default(), new_york);
        let (date, slot) = plan.best.iter().next().expect("one day");
        assert_eq!(date_label(date), "06/01/2024");
        assert_eq!(slot.time_label(), "22:00:00");
    }

    #[test]
    fn score_current_returns_breakdown() {
        let current = score_current(
            &raw_entry(SATURDAY + 20 * HOUR, "Clear", "clear sky"),
            &Preferences::default(),
            utc(),
        )
        .expect("current conditions should score");
        assert_eq!(current.breakdown.sky, 3.0);
        assert_eq!(current.breakdown.time_of_day, 2.0);
    }

    #[test]
    fn score_current_propagates_construction_errors() {
        let result = score_current(&RawForecastEntry::default(), &Preferences::default(), utc());
        assert!(matches!(result, Err(RuncastError::EmptyObservation)));
    }
}
