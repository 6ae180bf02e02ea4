use super::api::{ApiRequest, JsonSource};
use crate::error::{Result, RuncastError};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SUCCESS_CODE: i64 = 200;
pub const ERROR_CODE: i64 = 400;
pub const CITY_NOT_FOUND: i64 = 404;

/// File-backed store of API responses, one file per city and endpoint.
pub struct ResponseCache {
    dir: PathBuf,
    max_age: Duration,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self {
            dir: dir.into(),
            max_age,
        }
    }

    /// Separators in `city_name` are replaced so the file stays inside `dir`.
    pub fn path_for(&self, request: &ApiRequest, city_name: &str) -> PathBuf {
        let stem: String = city_name
            .chars()
            .map(|c| {
                if std::path::is_separator(c) || c == '\0' {
                    '_'
                } else {
                    c
                }
            })
            .collect();
        self.dir.join(format!("{stem}_{}", request.cache_suffix()))
    }

    /// Reuse a fresh successful response from disk, otherwise ask `source`
    /// and store what it returns.
    pub fn fetch(
        &self,
        source: &dyn JsonSource,
        request: &ApiRequest,
        city_name: &str,
    ) -> Result<Value> {
        let path = self.path_for(request, city_name);

        if let Some(stored) = self.load_fresh(&path) {
            match response_code(&stored) {
                Some(SUCCESS_CODE) => {
                    tracing::info!(path = %path.display(), "using cached response");
                    return Ok(stored);
                }
                Some(ERROR_CODE) => {
                    tracing::warn!(path = %path.display(), "stored data has error, retrying");
                }
                Some(CITY_NOT_FOUND) => {
                    return Err(RuncastError::CityNotFound(city_name.to_string()));
                }
                code => {
                    tracing::debug!(?code, path = %path.display(), "stored response not usable, refetching");
                }
            }
        }

        let fresh = source.get_json(request)?;
        match response_code(&fresh) {
            Some(SUCCESS_CODE) => {}
            code => {
                return Err(RuncastError::ApiStatus {
                    code: code.unwrap_or_default(),
                    message: response_message(&fresh),
                });
            }
        }

        fs::create_dir_all(&self.dir)?;
        fs::write(&path, serde_json::to_string_pretty(&fresh)?)?;
        tracing::info!(path = %path.display(), "wrote response to cache");
        Ok(fresh)
    }

    fn load_fresh(&self, path: &Path) -> Option<Value> {
        let modified = fs::metadata(path).and_then(|meta| meta.modified()).ok()?;
        let age = modified.elapsed().unwrap_or_default();
        if age >= self.max_age {
            tracing::debug!(path = %path.display(), age_secs = age.as_secs(), "cached response expired");
            return None;
        }

        let content = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable cache file");
                None
            }
        }
    }
}

/// `cod` is a string in forecast responses and a number in current ones.
pub fn response_code(value: &Value) -> Option<i64> {
    match value.get("cod")? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn response_message(value: &Value) -> String {
    match value.get("message") {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => "no message".to_string(),
    }
}
