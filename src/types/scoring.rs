use crate::types::report::Score;
use serde::Serialize;

/// Per-component contributions for one slot. `total` is their plain sum;
/// nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub temperature: Score,
    pub humidity: Score,
    pub wind: Score,
    pub sky: Score,
    pub time_of_day: Score,
    pub total: Score,
}

impl ScoreBreakdown {
    pub fn new(
        temperature: Score,
        humidity: Score,
        wind: Score,
        sky: Score,
        time_of_day: Score,
    ) -> Self {
        Self {
            temperature,
            humidity,
            wind,
            sky,
            time_of_day,
            total: temperature + humidity + wind + sky + time_of_day,
        }
    }
}
