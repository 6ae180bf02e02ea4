use crate::types::report::Score;

/// Quadratic in relative humidity: 0% scores 0, 100% scores 10.
pub fn humidity_score(humidity: f64) -> Score {
    (humidity.powi(2) / 100.0) / 10.0
}
