//! Raw OpenWeatherMap payloads and the plumbing that fetches them.

pub mod api;
pub mod cache;
pub mod normalize;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the five-day forecast `list`, or the body of a current
/// conditions response. Every field is optional here; `normalize` decides
/// which absences are fatal.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawForecastEntry {
    pub dt: Option<i64>,
    pub main: Option<RawMain>,
    pub wind: Option<RawWind>,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
    pub rain: Option<RawVolume>,
    pub snow: Option<RawVolume>,
}

impl RawForecastEntry {
    pub fn is_empty(&self) -> bool {
        self.dt.is_none()
            && self.main.is_none()
            && self.wind.is_none()
            && self.weather.is_empty()
            && self.rain.is_none()
            && self.snow.is_none()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawMain {
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawWind {
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawCondition {
    pub main: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// Precipitation volume in mm. Forecasts report `3h`, current conditions `1h`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawVolume {
    #[serde(rename = "3h")]
    pub three_hours: Option<f64>,
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
}

impl RawVolume {
    pub fn amount(&self) -> Option<f64> {
        self.three_hours.or(self.one_hour)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCity {
    /// Shift from UTC in seconds.
    pub timezone: Option<i32>,
}

/// Entries of `list` stay untyped so one malformed slot cannot fail the
/// whole response; the planner converts them one at a time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<Value>,
    pub city: Option<RawCity>,
}

impl ForecastResponse {
    pub fn timezone_offset(&self) -> Option<i32> {
        self.city.as_ref().and_then(|city| city.timezone)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentResponse {
    #[serde(flatten)]
    pub entry: RawForecastEntry,
    pub timezone: Option<i32>,
}
