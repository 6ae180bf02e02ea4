use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuncastError {
    #[error("observation has no timestamp")]
    MissingTimestamp,

    #[error("observation is empty")]
    EmptyObservation,

    #[error("invalid observation: {0}")]
    InvalidObservation(String),

    #[error("city not found: {0}")]
    CityNotFound(String),

    #[error("no API key configured (set [api] key or OPENWEATHER_API_KEY)")]
    MissingApiKey,

    #[error("weather API returned {code}: {message}")]
    ApiStatus { code: i64, message: String },

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, RuncastError>;
