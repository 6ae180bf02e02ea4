use crate::error::{Result, RuncastError};
use serde_json::Value;
use std::time::Duration;

const UNITS: &str = "imperial";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRequest {
    ForecastById(u64),
    CurrentById(u64),
}

impl ApiRequest {
    pub fn path_and_query(&self) -> String {
        match self {
            Self::ForecastById(id) => format!("/forecast?id={id}"),
            Self::CurrentById(id) => format!("/weather?id={id}"),
        }
    }

    pub fn cache_suffix(&self) -> &'static str {
        match self {
            Self::ForecastById(_) => "fiveday.json",
            Self::CurrentById(_) => "current.json",
        }
    }
}

/// Anything that can answer an `ApiRequest` with a JSON body.
pub trait JsonSource {
    fn get_json(&self, request: &ApiRequest) -> Result<Value>;
}

pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn url(&self, request: &ApiRequest) -> Result<String> {
        let key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(RuncastError::MissingApiKey)?;
        Ok(format!(
            "{}{}&units={UNITS}&APPID={key}",
            self.base_url,
            request.path_and_query()
        ))
    }
}

impl JsonSource for ApiClient {
    fn get_json(&self, request: &ApiRequest) -> Result<Value> {
        let url = self.url(request)?;
        tracing::info!(
            request = %format!("{}{}", self.base_url, request.path_and_query()),
            "requesting weather API"
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()?;
        let status = response.status();
        let body = response.text()?;

        // error bodies still carry a JSON "cod"; only give up when there is none
        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(RuncastError::ApiStatus {
                code: i64::from(status.as_u16()),
                message: body.chars().take(200).collect(),
            }),
            Err(err) => Err(RuncastError::Json(err)),
        }
    }
}
