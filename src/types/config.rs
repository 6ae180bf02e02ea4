use crate::error::RuncastError;
use crate::types::observation::Preferences;
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_UNITS: &str = "imperial";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CACHE_DIR: &str = "samples";
pub const DEFAULT_CACHE_MAX_AGE_MINUTES: u64 = 180;
pub const DEFAULT_CITY_LIST: &str = "data/city.list.json.gz";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuncastConfig {
    pub api: Option<ApiConfig>,
    pub cache: Option<CacheConfig>,
    pub cities: Option<CitiesConfig>,
    pub preferences: Option<PreferencesConfig>,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub key: Option<String>,
    pub base_url: Option<String>,
    pub units: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub dir: Option<PathBuf>,
    pub max_age_minutes: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CitiesConfig {
    pub list_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferencesConfig {
    pub optimal_temp: Option<f64>,
    pub prefer_cold: Option<bool>,
    pub prefer_early: Option<bool>,
    /// Keys this version does not understand; kept, never read.
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub timezone: Option<String>,
}

/// How epoch timestamps become calendar dates and clock times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeZonePolicy {
    Utc,
    /// Offset reported by the forecast response for the city.
    City,
    Fixed(FixedOffset),
}

impl TimeZonePolicy {
    pub fn parse(value: &str) -> Result<Self, RuncastError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "utc" | "z" => Ok(Self::Utc),
            "city" => Ok(Self::City),
            other => parse_fixed_offset(other).map(Self::Fixed).ok_or_else(|| {
                RuncastError::ConfigParse(format!(
                    "report.timezone must be \"utc\", \"city\" or an offset like +05:30 (found {value})"
                ))
            }),
        }
    }

    /// Resolve to a concrete offset; `city_offset_secs` comes from the response.
    pub fn offset(&self, city_offset_secs: Option<i32>) -> FixedOffset {
        let utc = Utc.fix();
        match self {
            Self::Utc => utc,
            Self::City => city_offset_secs
                .and_then(FixedOffset::east_opt)
                .unwrap_or(utc),
            Self::Fixed(offset) => *offset,
        }
    }
}

fn parse_fixed_offset(value: &str) -> Option<FixedOffset> {
    let (sign, rest) = match *value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours = offset_part(hours)?;
    let minutes = offset_part(minutes)?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// One or two ASCII digits, no sign.
fn offset_part(value: &str) -> Option<i32> {
    if value.is_empty() || value.len() > 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

impl RuncastConfig {
    pub fn api_key(&self) -> Option<String> {
        std::env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api.as_ref().and_then(|api| api.key.clone()))
    }

    pub fn base_url(&self) -> String {
        self.api
            .as_ref()
            .and_then(|api| api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn timeout_secs(&self) -> u64 {
        self.api
            .as_ref()
            .and_then(|api| api.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache
            .as_ref()
            .and_then(|cache| cache.dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR))
    }

    pub fn cache_max_age_minutes(&self) -> u64 {
        self.cache
            .as_ref()
            .and_then(|cache| cache.max_age_minutes)
            .unwrap_or(DEFAULT_CACHE_MAX_AGE_MINUTES)
    }

    pub fn city_list_file(&self) -> PathBuf {
        self.cities
            .as_ref()
            .and_then(|cities| cities.list_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CITY_LIST))
    }

    /// Missing keys fall back to the documented defaults.
    pub fn preferences(&self) -> Preferences {
        let defaults = Preferences::default();
        match &self.preferences {
            Some(prefs) => Preferences {
                optimal_temp: prefs.optimal_temp.unwrap_or(defaults.optimal_temp),
                prefer_cold: prefs.prefer_cold.unwrap_or(defaults.prefer_cold),
                prefer_early: prefs.prefer_early.unwrap_or(defaults.prefer_early),
            },
            None => defaults,
        }
    }

    pub fn timezone(&self) -> Result<TimeZonePolicy, RuncastError> {
        match self.report.as_ref().and_then(|report| report.timezone.as_ref()) {
            Some(value) => TimeZonePolicy::parse(value),
            None => Ok(TimeZonePolicy::Utc),
        }
    }

    pub fn validate(&self) -> Result<(), RuncastError> {
        if let Some(api) = &self.api {
            if let Some(units) = &api.units {
                if units != DEFAULT_UNITS {
                    return Err(RuncastError::ConfigParse(format!(
                        "api.units must be \"{DEFAULT_UNITS}\" (found {units})"
                    )));
                }
            }
            if api.timeout_secs == Some(0) {
                return Err(RuncastError::ConfigParse(
                    "api.timeout_secs must be greater than 0".to_string(),
                ));
            }
        }

        if let Some(optimal_temp) = self
            .preferences
            .as_ref()
            .and_then(|prefs| prefs.optimal_temp)
        {
            if !optimal_temp.is_finite() {
                return Err(RuncastError::ConfigParse(
                    "preferences.optimal_temp must be a finite number".to_string(),
                ));
            }
        }

        if let Some(prefs) = &self.preferences {
            if !prefs.extra.is_empty() {
                tracing::debug!(
                    keys = ?prefs.extra.keys().collect::<Vec<_>>(),
                    "ignoring unrecognized preference keys"
                );
            }
        }

        self.timezone()?;
        Ok(())
    }
}
