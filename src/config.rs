//! Runtime configuration: the city catalog and display labels.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, TripError};

const DEFAULT_CITIES: &[(&str, &str)] = &[
    ("chicago", "chicago.csv"),
    ("new york", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

/// Maps city names to the CSV file holding their trips.
///
/// Can be loaded from a plain JSON object on disk:
/// ```json
/// {
///   "chicago": "chicago.csv",
///   "new york": "new_york_city.csv"
/// }
/// ```
/// Relative paths are resolved against the catalog's data directory.
#[derive(Debug, Clone)]
pub struct CityCatalog {
    data_dir: PathBuf,
    entries: BTreeMap<String, PathBuf>,
}

impl Default for CityCatalog {
    fn default() -> Self {
        CityCatalog::builtin(".")
    }
}

impl CityCatalog {
    /// The three published cities, resolved against `data_dir`.
    pub fn builtin(data_dir: impl Into<PathBuf>) -> Self {
        let entries = DEFAULT_CITIES
            .iter()
            .map(|(city, file)| (city.to_string(), PathBuf::from(file)))
            .collect();
        CityCatalog {
            data_dir: data_dir.into(),
            entries,
        }
    }

    /// Loads the catalog from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>, data_dir: impl Into<PathBuf>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content, data_dir)
    }

    pub fn from_json(content: &str, data_dir: impl Into<PathBuf>) -> Result<Self> {
        let raw: BTreeMap<String, PathBuf> = serde_json::from_str(content)?;
        let entries = raw
            .into_iter()
            .map(|(city, path)| (normalize_city(&city), path))
            .collect();
        Ok(CityCatalog {
            data_dir: data_dir.into(),
            entries,
        })
    }

    /// Returns the resolved CSV path for `city`, ignoring case.
    pub fn path_for(&self, city: &str) -> Result<PathBuf> {
        let path = self
            .entries
            .get(&normalize_city(city))
            .ok_or_else(|| TripError::UnknownCity {
                city: city.to_string(),
            })?;
        Ok(self.data_dir.join(path))
    }

    /// City names in alphabetical order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn normalize_city(city: &str) -> String {
    city.trim().to_lowercase()
}

const ORDINALS: &[&str] = &[
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth", "tenth",
];

/// Words used when labelling aggregated results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelConfig {
    pub ordinals: Vec<String>,
    /// Joins start and end station into a trip key.
    pub trip_separator: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        LabelConfig {
            ordinals: ORDINALS.iter().map(|s| s.to_string()).collect(),
            trip_separator: " to ".to_string(),
        }
    }
}

impl LabelConfig {
    /// Ordinal word for a 0-based rank, or `#N` past the end of the table.
    pub fn ordinal(&self, rank: usize) -> String {
        self.ordinals
            .get(rank)
            .cloned()
            .unwrap_or_else(|| format!("#{}", rank + 1))
    }
}
