use super::RawForecastEntry;
use crate::error::{Result, RuncastError};
use crate::types::observation::{Sky, SkyCategory, WeatherObservation};
use chrono::{DateTime, FixedOffset};

/// Turn a raw API record into an observation, reading clock time at `offset`.
pub fn normalize(entry: &RawForecastEntry, offset: FixedOffset) -> Result<WeatherObservation> {
    if entry.is_empty() {
        return Err(RuncastError::EmptyObservation);
    }

    let timestamp = match entry.dt {
        Some(dt) => Some(
            DateTime::from_timestamp(dt, 0)
                .ok_or_else(|| {
                    RuncastError::InvalidObservation(format!("timestamp out of range: {dt}"))
                })?
                .with_timezone(&offset),
        ),
        None => None,
    };

    let main = entry.main.as_ref();
    let temperature = main
        .and_then(|main| main.temp)
        .ok_or_else(|| missing("main.temp"))?;
    let humidity = main
        .and_then(|main| main.humidity)
        .ok_or_else(|| missing("main.humidity"))?;
    let wind_speed = entry
        .wind
        .as_ref()
        .and_then(|wind| wind.speed)
        .ok_or_else(|| missing("wind.speed"))?;
    let condition = entry.weather.first().ok_or_else(|| missing("weather[0]"))?;

    let category = condition
        .main
        .as_deref()
        .ok_or_else(|| missing("weather[0].main"))?;

    let parent_category = SkyCategory::parse(category);
    let volume = match parent_category {
        SkyCategory::Rain => entry.rain.as_ref(),
        SkyCategory::Snow => entry.snow.as_ref(),
        _ => None,
    };
    let precipitation = volume.and_then(|volume| volume.amount()).unwrap_or(0.0);

    WeatherObservation::new(
        timestamp,
        temperature,
        wind_speed,
        humidity,
        Sky {
            parent_category,
            sub_category: condition.description.clone(),
            precipitation,
        },
    )
}

fn missing(field: &str) -> RuncastError {
    RuncastError::InvalidObservation(format!("missing {field}"))
}
