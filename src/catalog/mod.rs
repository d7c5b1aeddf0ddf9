//! Autofill catalog
//!
//! A read-only table of known titles, loaded once at startup. When the name
//! input loses focus and its value matches an entry, the rest of the form is
//! filled from the record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::form::ContentForm;
use crate::models::ContentType;

/// Errors that can occur while loading the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog record '{name}': {reason}")]
    InvalidRecord { name: String, reason: String },
}

/// One known title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub genre: String,
    /// Running time in minutes, filled for movies
    #[serde(default)]
    pub length: Option<u32>,
    pub rating: f64,
    /// First air date; seasons and episodes are derived from it
    #[serde(default)]
    pub started_on: Option<NaiveDate>,
    /// "Yes", "No" or unknown
    #[serde(default)]
    pub on_netflix: Option<String>,
}

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
const MILLIS_PER_SEASON: i64 = 365 * MILLIS_PER_DAY;

impl CatalogRecord {
    /// Milliseconds between midnight UTC of the start date and `now`
    fn millis_running(&self, now: DateTime<Utc>) -> Option<i64> {
        self.started_on
            .and_then(|start| start.and_hms_opt(0, 0, 0))
            .map(|start| (now - start.and_utc()).num_milliseconds().abs())
    }

    /// One season per started 365 days on air
    pub fn seasons_on(&self, now: DateTime<Utc>) -> Option<i64> {
        self.millis_running(now).map(|ms| div_ceil(ms, MILLIS_PER_SEASON))
    }

    /// One episode per started day on air
    pub fn episodes_on(&self, now: DateTime<Utc>) -> Option<i64> {
        self.millis_running(now).map(|ms| div_ceil(ms, MILLIS_PER_DAY))
    }
}

fn div_ceil(value: i64, divisor: i64) -> i64 {
    (value + divisor - 1) / divisor
}

/// Lookup table keyed by lowercase title
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: HashMap<String, CatalogRecord>,
}

impl Catalog {
    /// Table shipped with the application
    pub fn builtin() -> Self {
        let mut records = HashMap::new();
        records.insert(
            "nuha".to_string(),
            CatalogRecord {
                content_type: ContentType::Series,
                genre: "Romance".to_string(),
                length: Some(8),
                rating: 10.0,
                started_on: NaiveDate::from_ymd_opt(2021, 7, 2),
                on_netflix: Some("No".to_string()),
            },
        );
        Self { records }
    }

    /// Parse a JSON object mapping titles to records
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: HashMap<String, CatalogRecord> = serde_json::from_str(json)?;
        let mut records = HashMap::with_capacity(raw.len());

        for (name, record) in raw {
            if !(0.0..=10.0).contains(&record.rating) {
                return Err(CatalogError::InvalidRecord {
                    name,
                    reason: format!("rating {} is outside 0-10", record.rating),
                });
            }
            records.insert(normalize(&name), record);
        }

        Ok(Self { records })
    }

    /// Read a JSON catalog from disk
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path` when given, otherwise use the built-in table
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::builtin(),
        };
        info!("Loaded {} catalog entries", catalog.len());
        Ok(catalog)
    }

    /// Find the record for a title, ignoring case and surrounding whitespace
    pub fn lookup(&self, name: &str) -> Option<&CatalogRecord> {
        self.records.get(&normalize(name))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Fill the form from the catalog entry matching the name input
///
/// Returns the confirmation message to show, or `None` when the name is not
/// in the catalog.
pub fn autofill(form: &ContentForm, catalog: &Catalog, now: DateTime<Utc>) -> Option<String> {
    let entered = form.elements().name.read(|f| f.value().to_string());
    let record = catalog.lookup(&entered)?;
    let el = form.elements();

    el.genre.write(|f| f.set_value(&record.genre));
    el.rating.write(|f| f.set_value(record.rating.to_string()));
    el.content_type
        .write(|f| f.set_value(record.content_type.as_str()));
    el.on_netflix
        .write(|f| f.set_value(record.on_netflix.clone().unwrap_or_default()));

    form.show_fields_for(record.content_type);

    match record.content_type {
        ContentType::Movie => {
            if let Some(length) = record.length {
                el.length.write(|f| f.set_value(length.to_string()));
            }
        }
        ContentType::Series => {
            if let Some(seasons) = record.seasons_on(now) {
                el.seasons.write(|f| f.set_value(seasons.to_string()));
            }
            if let Some(episodes) = record.episodes_on(now) {
                el.episodes.write(|f| f.set_value(episodes.to_string()));
            }
        }
    }

    info!("Autofilled '{}' from catalog", entered.trim());
    Some(format!("Auto-filled details for {}", entered))
}
