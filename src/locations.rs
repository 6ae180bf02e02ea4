//! City name <-> id lookup backed by the OpenWeatherMap bulk city list
//! (`city.list.json.gz`).

use crate::error::{Result, RuncastError};
use flate2::read::GzDecoder;
use serde::Deserialize;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Resolved without touching the city list.
pub const SAMPLE_CITIES: [(&str, u64); 4] = [
    ("New York", 5128581),
    ("London", 5367815),
    ("Florence", 5727032),
    ("Madrid", 4865871),
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct CityListEntry {
    id: u64,
    name: String,
    #[serde(default)]
    country: String,
    coord: Option<Coord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityRecord {
    pub id: u64,
    pub name: String,
    pub country: String,
    pub coord: Coord,
}

#[derive(Debug, Default)]
pub struct CityIndex {
    by_name: HashMap<String, CityRecord>,
    by_id: HashMap<u64, CityRecord>,
}

impl CityIndex {
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "parsing city locations");
        let file = File::open(path)?;
        let entries: Vec<CityListEntry> =
            serde_json::from_reader(BufReader::new(GzDecoder::new(file)))?;
        let index = Self::from_entries(entries);
        tracing::info!(cities = index.by_id.len(), "parsed city locations");
        Ok(index)
    }

    fn from_entries(entries: Vec<CityListEntry>) -> Self {
        let mut index = Self::default();
        for entry in entries {
            let Some(coord) = entry.coord else {
                continue;
            };
            let record = CityRecord {
                id: entry.id,
                name: entry.name,
                country: entry.country,
                coord,
            };
            index.by_name.insert(record.name.clone(), record.clone());
            index.by_id.insert(record.id, record);
        }
        index
    }

    pub fn by_name(&self, name: &str) -> Option<&CityRecord> {
        self.by_name.get(name)
    }

    pub fn by_id(&self, id: u64) -> Option<&CityRecord> {
        self.by_id.get(&id)
    }
}

/// Owns the city list location and parses it on first use.
pub struct CityDirectory {
    list_file: PathBuf,
    index: OnceCell<CityIndex>,
}

impl CityDirectory {
    pub fn new(list_file: impl Into<PathBuf>) -> Self {
        Self {
            list_file: list_file.into(),
            index: OnceCell::new(),
        }
    }

    #[cfg(test)]
    fn with_index(index: CityIndex) -> Self {
        Self {
            list_file: PathBuf::new(),
            index: OnceCell::from(index),
        }
    }

    fn index(&self) -> Result<&CityIndex> {
        if let Some(index) = self.index.get() {
            return Ok(index);
        }
        let loaded = CityIndex::load(&self.list_file)?;
        Ok(self.index.get_or_init(|| loaded))
    }

    pub fn resolve_id_by_name(&self, name: &str) -> Result<u64> {
        if let Some((_, id)) = SAMPLE_CITIES.iter().find(|(sample, _)| *sample == name) {
            return Ok(*id);
        }
        self.index()?
            .by_name(name)
            .map(|record| record.id)
            .ok_or_else(|| RuncastError::CityNotFound(name.to_string()))
    }

    /// Full record for `id` when the city list is available.
    pub fn record(&self, id: u64) -> Option<&CityRecord> {
        self.index().ok()?.by_id(id)
    }

    pub fn resolve_name_by_id(&self, id: u64) -> Result<String> {
        if let Some((name, _)) = SAMPLE_CITIES.iter().find(|(_, sample)| *sample == id) {
            return Ok(name.to_string());
        }
        self.index()?
            .by_id(id)
            .map(|record| record.name.clone())
            .ok_or_else(|| RuncastError::CityNotFound(id.to_string()))
    }
}

/// A city as given on the command line: digits are an id, anything else a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityQuery {
    Id(u64),
    Name(String),
}

impl CityQuery {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.parse::<u64>() {
            Ok(id) if trimmed.chars().all(|c| c.is_ascii_digit()) => Self::Id(id),
            _ => Self::Name(trimmed.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: u64,
    pub name: String,
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Name: {}, ID: {}", self.name, self.id)
    }
}

pub fn resolve(directory: &CityDirectory, query: &CityQuery) -> Result<City> {
    match query {
        CityQuery::Id(id) => Ok(City {
            id: *id,
            name: directory.resolve_name_by_id(*id)?,
        }),
        CityQuery::Name(name) => Ok(City {
            id: directory.resolve_id_by_name(name)?,
            name: name.clone(),
        }),
    }
}
