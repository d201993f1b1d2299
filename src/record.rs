use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp format used by the EPIC API and in metadata sidecars.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Centroid {
    pub lat: f64,
    pub lon: f64,
}

/// One image entry as returned by the EPIC metadata endpoint. Unknown fields
/// in the response are ignored; `caption` and `centroid_coordinates` are
/// defaulted when absent.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ImageRecord {
    pub image: String,
    pub date: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub centroid_coordinates: Centroid,
}

impl ImageRecord {
    /// Parses the record's capture timestamp.
    pub fn timestamp(self: &Self) -> Result<NaiveDateTime> {
        let timestamp = NaiveDateTime::parse_from_str(&self.date, DATE_TIME_FORMAT)?;
        Ok(timestamp)
    }

    /// Synthesizes metadata for an archived image that has no sidecar:
    /// midnight of the day folder's date, empty caption, zero coordinates.
    pub fn placeholder(date: NaiveDate, image_name: &str) -> Self {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap();
        Self {
            image: image_name.to_string(),
            date: midnight.format(DATE_TIME_FORMAT).to_string(),
            caption: String::new(),
            centroid_coordinates: Centroid::default(),
        }
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let record: Self = serde_json::from_str(&content)?;
        Ok(record)
    }

    pub fn write<P: AsRef<Path>>(self: &Self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// The entry a run resolved to, fresh or fallback. Threaded through the
/// tail of the pipeline by value.
#[derive(Debug, Clone)]
pub struct ResolvedEntry {
    pub record: ImageRecord,
    pub image_path: PathBuf,
}
