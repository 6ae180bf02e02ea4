use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::collections::BTreeMap;

pub type Score = f64;

/// Time-of-day score for weekday daytime slots; dominates the sum so the
/// slot never wins a day that has any alternative.
pub const EXCLUDED_SLOT_SCORE: Score = 99.0;

/// Starting score of a day bucket before any slot has been seen.
pub const NO_SLOT_SCORE: Score = 999.0;

pub const DATE_FORMAT: &str = "%m/%d/%Y";
pub const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredSlot {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub score: Score,
}

impl ScoredSlot {
    pub fn new(date: NaiveDate, time: NaiveTime, score: Score) -> Self {
        Self { date, time, score }
    }
}

/// Winner of one day bucket. `time` is `None` only while the bucket still
/// holds the `NO_SLOT_SCORE` starting value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestSlot {
    pub time: Option<NaiveTime>,
    pub score: Score,
}

impl BestSlot {
    pub fn unset() -> Self {
        Self {
            time: None,
            score: NO_SLOT_SCORE,
        }
    }

    pub fn time_label(&self) -> String {
        self.time
            .map(|time| time.format(TIME_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// True when the winning slot still carries the weekday-daytime penalty.
    pub fn is_excluded(&self) -> bool {
        self.score >= EXCLUDED_SLOT_SCORE
    }
}

pub type BestTimes = BTreeMap<NaiveDate, BestSlot>;

pub fn date_label(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct DayReport {
    pub date: String,
    pub time: String,
    pub score: Score,
    pub excluded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub city: String,
    pub city_id: u64,
    pub days: Vec<DayReport>,
    pub skipped: usize,
}

impl RunReport {
    pub fn new(city: &str, city_id: u64, best: &BestTimes, skipped: usize) -> Self {
        let days = best
            .iter()
            .map(|(date, slot)| DayReport {
                date: date_label(date),
                time: slot.time_label(),
                score: slot.score,
                excluded: slot.is_excluded(),
            })
            .collect();
        Self {
            city: city.to_string(),
            city_id,
            days,
            skipped,
        }
    }

    pub fn has_warnings(&self) -> bool {
        self.skipped > 0 || self.days.iter().any(|day| day.excluded)
    }
}
