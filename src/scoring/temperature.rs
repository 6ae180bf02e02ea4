use crate::types::observation::Preferences;
use crate::types::report::Score;

/// Fahrenheit span the temperature score is normalized against.
pub const MIN_TEMP: f64 = -20.0;
pub const MAX_TEMP: f64 = 125.0;

/// Distance from the optimal temperature, shifted by `MIN_TEMP` and scaled by
/// the span. Deviation in the direction the runner dislikes counts double.
pub fn temperature_score(temperature: f64, prefs: &Preferences) -> Score {
    let optimal = prefs.optimal_temp;
    let mut score =
        10.0 * ((temperature - optimal) - MIN_TEMP).powi(2).sqrt() / (MAX_TEMP - MIN_TEMP);

    let wrong_direction = if prefs.prefer_cold {
        temperature > optimal
    } else {
        temperature < optimal
    };
    if wrong_direction {
        score *= 2.0;
    }
    score
}
