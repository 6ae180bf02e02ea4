pub mod humidity;
pub mod sky;
pub mod temperature;
pub mod time_of_day;
pub mod wind;

use crate::types::observation::{Preferences, WeatherObservation};
use crate::types::report::Score;
pub use crate::types::scoring::ScoreBreakdown;

pub fn breakdown(observation: &WeatherObservation, prefs: &Preferences) -> ScoreBreakdown {
    let card = ScoreBreakdown::new(
        temperature::temperature_score(observation.temperature(), prefs),
        humidity::humidity_score(observation.humidity()),
        wind::wind_score(observation.wind_speed()),
        sky::sky_score(observation.sky()),
        time_of_day::time_of_day_score(&observation.timestamp(), prefs.prefer_early),
    );
    tracing::debug!(
        timestamp = %observation.timestamp(),
        temperature = card.temperature,
        humidity = card.humidity,
        wind = card.wind,
        sky = card.sky,
        time_of_day = card.time_of_day,
        total = card.total,
        "scored slot"
    );
    card
}

/// Running difficulty of one slot; lower is better.
pub fn score(observation: &WeatherObservation, prefs: &Preferences) -> Score {
    breakdown(observation, prefs).total
}
