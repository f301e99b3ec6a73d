use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::{info, warn};
use thiserror::Error;

use crate::models::{activity::Activity, review::Review, review::Sentiment};

pub const REVIEW_COLUMNS: [&str; 6] = [
    "Cleaned_Review",
    "Sentiment",
    "District",
    "Destination",
    "Latitude",
    "Longitude",
];

pub const ACTIVITY_COLUMNS: [&str; 3] = ["Activity Category", "Activity", "District"];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{} not found.", .path.display())]
    MissingFile { path: PathBuf },

    #[error("Missing expected column '{column}' in {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("Failed to open {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Failed to read {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },
}

/// A loaded table. Load failures produce an empty table plus a warning, never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub rows: Vec<T>,
    pub warning: Option<String>,
}

impl<T> Loaded<T> {
    pub fn empty(warning: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            warning: Some(warning.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            warning: None,
        }
    }
}

/// Title-cases each alphabetic run: "nuwara eliya" becomes "Nuwara Eliya".
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_alpha = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

fn normalize_label(value: &str) -> String {
    title_case(value.trim())
}

/// Parses a coordinate, mapping anything unparsable or non-finite to `None`.
fn parse_coordinate(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Positions of the required columns in the header row, in the order requested.
fn column_indices(
    headers: &StringRecord,
    required: &[&str],
    path: &Path,
) -> Result<Vec<usize>, LoadError> {
    required
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|h| h.trim() == *column)
                .ok_or_else(|| LoadError::MissingColumn {
                    column: column.to_string(),
                    path: path.to_path_buf(),
                })
        })
        .collect()
}

/// Opens `path` and hands each record, with the resolved column positions, to `parse_row`.
fn read_table<T>(
    path: &Path,
    required: &[&str],
    mut parse_row: impl FnMut(&[&str]) -> Option<T>,
) -> Result<Vec<T>, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader
        .headers()
        .map_err(|e| LoadError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?
        .clone();
    let indices = column_indices(&headers, required, path)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping row {} of {}: {}", idx + 1, path.display(), e);
                continue;
            }
        };
        let fields: Vec<&str> = indices
            .iter()
            .map(|&i| record.get(i).unwrap_or(""))
            .collect();
        if let Some(row) = parse_row(&fields) {
            rows.push(row);
        }
    }

    Ok(rows)
}

fn read_reviews(path: &Path) -> Result<Vec<Review>, LoadError> {
    read_table(path, &REVIEW_COLUMNS, |fields| {
        let sentiment = normalize_label(fields[1]).parse::<Sentiment>().ok()?;
        Some(Review {
            cleaned_review: fields[0].to_string(),
            sentiment,
            district: normalize_label(fields[2]),
            destination: normalize_label(fields[3]),
            latitude: parse_coordinate(fields[4]),
            longitude: parse_coordinate(fields[5]),
        })
    })
}

fn read_activities(path: &Path) -> Result<Vec<Activity>, LoadError> {
    read_table(path, &ACTIVITY_COLUMNS, |fields| {
        Some(Activity {
            category: normalize_label(fields[0]),
            activity: fields[1].trim().to_string(),
            district: normalize_label(fields[2]),
        })
    })
}

fn into_loaded<T>(kind: &str, result: Result<Vec<T>, LoadError>) -> Loaded<T> {
    match result {
        Ok(rows) => {
            info!("Loaded {} {} rows", rows.len(), kind);
            Loaded {
                rows,
                warning: None,
            }
        }
        Err(e) => {
            warn!("Falling back to an empty {} table: {}", kind, e);
            Loaded::empty(e.to_string())
        }
    }
}

/// Loads and cleans the review table. Rows whose sentiment is not Positive,
/// Neutral or Negative are dropped.
pub fn load_reviews(path: &Path) -> Loaded<Review> {
    into_loaded("review", read_reviews(path))
}

pub fn load_activities(path: &Path) -> Loaded<Activity> {
    into_loaded("activity", read_activities(path))
}
