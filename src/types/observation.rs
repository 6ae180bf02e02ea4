use crate::error::{Result, RuncastError};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

pub const DEFAULT_OPTIMAL_TEMP: f64 = 55.0;
pub const DEFAULT_PREFER_COLD: bool = true;
pub const DEFAULT_PREFER_EARLY: bool = false;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkyCategory {
    Clear,
    Clouds,
    Rain,
    Snow,
    Other(String),
}

impl SkyCategory {
    pub fn parse(main: &str) -> Self {
        match main {
            "Clear" => Self::Clear,
            "Clouds" => Self::Clouds,
            "Rain" => Self::Rain,
            "Snow" => Self::Snow,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sky {
    pub parent_category: SkyCategory,
    pub sub_category: String,
    /// mm over the reporting window, 0.0 when absent
    pub precipitation: f64,
}

/// One normalized forecast slot. Imperial units throughout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherObservation {
    timestamp: DateTime<FixedOffset>,
    temperature: f64,
    wind_speed: f64,
    humidity: f64,
    sky: Sky,
}

impl WeatherObservation {
    /// Fails with `MissingTimestamp` when no timestamp is given and with
    /// `InvalidObservation` when a numeric field is outside its domain.
    pub fn new(
        timestamp: Option<DateTime<FixedOffset>>,
        temperature: f64,
        wind_speed: f64,
        humidity: f64,
        sky: Sky,
    ) -> Result<Self> {
        let timestamp = timestamp.ok_or(RuncastError::MissingTimestamp)?;
        if !temperature.is_finite() {
            return Err(RuncastError::InvalidObservation(format!(
                "temperature must be finite (found {temperature})"
            )));
        }
        if !wind_speed.is_finite() || wind_speed < 0.0 {
            return Err(RuncastError::InvalidObservation(format!(
                "wind speed must be a non-negative number (found {wind_speed})"
            )));
        }
        if !(0.0..=100.0).contains(&humidity) {
            return Err(RuncastError::InvalidObservation(format!(
                "humidity must be between 0 and 100 (found {humidity})"
            )));
        }
        if !sky.precipitation.is_finite() || sky.precipitation < 0.0 {
            return Err(RuncastError::InvalidObservation(format!(
                "precipitation must be a non-negative number (found {})",
                sky.precipitation
            )));
        }

        Ok(Self {
            timestamp,
            temperature,
            wind_speed,
            humidity,
            sky,
        })
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn wind_speed(&self) -> f64 {
        self.wind_speed
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn sky(&self) -> &Sky {
        &self.sky
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preferences {
    pub optimal_temp: f64,
    /// Penalize temperatures above optimal twice as hard (below when false).
    pub prefer_cold: bool,
    /// Mirror the time-of-day score around 10.
    pub prefer_early: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            optimal_temp: DEFAULT_OPTIMAL_TEMP,
            prefer_cold: DEFAULT_PREFER_COLD,
            prefer_early: DEFAULT_PREFER_EARLY,
        }
    }
}
