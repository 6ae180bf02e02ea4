use crate::types::report::Score;

pub const MAX_WIND_SPEED: f64 = 65.0;

/// Linear in mph, not capped above `MAX_WIND_SPEED`.
pub fn wind_score(wind_speed: f64) -> Score {
    wind_speed / MAX_WIND_SPEED
}
