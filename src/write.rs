//! Writers for a stream of close approaches.
//!
//! [`write_to_csv`] and [`write_to_json`] take close approaches in the order
//! they should appear in the output file and never sort or filter them. Every
//! approach must already be linked to its NEO; an unlinked one fails with
//! [`Error::UnlinkedApproach`] before anything is written.
//!
//! The CSV file carries the full datetime (`2020-01-01 00:00:00`) while the
//! JSON file carries the minute-precision display string (`2020-01-01 00:00`).
//! Downstream consumers rely on both spellings.

use crate::error::{Error, Result};
use crate::models::serde_helpers::{capitalized_bool, float_as_text, name_or_marker, nan_as_null};
use crate::models::{CloseApproach, NearEarthObject};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Header of the CSV output, in column order.
pub const CSV_FIELDS: [&str; 7] = [
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

#[derive(Debug, Serialize)]
struct CsvRow {
    datetime_utc: String,
    #[serde(serialize_with = "float_as_text")]
    distance_au: f64,
    #[serde(serialize_with = "float_as_text")]
    velocity_km_s: f64,
    designation: String,
    #[serde(serialize_with = "name_or_marker")]
    name: Option<String>,
    #[serde(serialize_with = "float_as_text")]
    diameter_km: f64,
    #[serde(serialize_with = "capitalized_bool")]
    potentially_hazardous: bool,
}

impl CsvRow {
    fn new(approach: &CloseApproach, neo: &NearEarthObject) -> Self {
        CsvRow {
            datetime_utc: approach.time.to_string(),
            distance_au: approach.distance,
            velocity_km_s: approach.velocity,
            designation: neo.designation.clone(),
            name: neo.name.clone(),
            diameter_km: neo.diameter,
            potentially_hazardous: neo.hazardous,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonApproach {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    neo: JsonNeo,
}

#[derive(Debug, Serialize)]
struct JsonNeo {
    designation: String,
    name: Option<String>,
    #[serde(serialize_with = "nan_as_null")]
    diameter_km: f64,
    potentially_hazardous: bool,
}

impl JsonApproach {
    fn new(approach: &CloseApproach, neo: &NearEarthObject) -> Self {
        JsonApproach {
            datetime_utc: approach.time_str(),
            distance_au: approach.distance,
            velocity_km_s: approach.velocity,
            neo: JsonNeo {
                designation: neo.designation.clone(),
                name: neo.name.clone(),
                diameter_km: neo.diameter,
                potentially_hazardous: neo.hazardous,
            },
        }
    }
}

/// Output format of an export, picked from the output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(OutputFormat::Csv),
            Some("json") => Ok(OutputFormat::Json),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Resolves every approach to its NEO, in order, and maps it to an output record.
fn linked_records<I, T, F>(results: I, to_record: F) -> Result<Vec<T>>
where
    I: IntoIterator,
    I::Item: AsRef<CloseApproach>,
    F: Fn(&CloseApproach, &Arc<NearEarthObject>) -> T,
{
    results
        .into_iter()
        .map(|item| {
            let approach = item.as_ref();
            let neo = approach.linked_neo()?;
            Ok(to_record(approach, &neo))
        })
        .collect()
}

/// Writes close approaches to a CSV file, replacing any existing file.
///
/// Each row holds one close approach and its NEO: the approach datetime,
/// distance and velocity, then the NEO designation, name (`None` when
/// unnamed), diameter (`nan` when unknown) and hazard flag (`True`/`False`).
/// The header row is written even when `results` is empty.
///
/// # Errors
/// - [`Error::UnlinkedApproach`] if an approach has no NEO; the file is left untouched
/// - [`Error::Io`] / [`Error::Csv`] if the file can't be created or written
pub fn write_to_csv<I>(results: I, path: &Path) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<CloseApproach>,
{
    let rows = linked_records(results, |approach, neo| CsvRow::new(approach, neo))?;
    debug!(rows = rows.len(), path = %path.display(), "writing CSV");

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(CSV_FIELDS)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(rows = rows.len(), path = %path.display(), "close approaches written to CSV");
    Ok(())
}

/// Writes close approaches to a JSON file, replacing any existing file.
///
/// The file holds a single array, indented by two spaces. Each element maps
/// `datetime_utc` (minute precision), `distance_au` and `velocity_km_s` of the
/// approach, and `neo` to an object with the NEO `designation`, `name`,
/// `diameter_km` and `potentially_hazardous`. An absent name and an unknown
/// diameter are written as `null`.
///
/// # Errors
/// - [`Error::UnlinkedApproach`] if an approach has no NEO; the file is left untouched
/// - [`Error::Io`] / [`Error::Json`] if the file can't be created or written
pub fn write_to_json<I>(results: I, path: &Path) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<CloseApproach>,
{
    let records = linked_records(results, |approach, neo| JsonApproach::new(approach, neo))?;
    debug!(records = records.len(), path = %path.display(), "writing JSON");

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(records = records.len(), path = %path.display(), "close approaches written to JSON");
    Ok(())
}

/// Writes close approaches with the writer matching the extension of `path`.
pub fn write_results<I>(results: I, path: &Path) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<CloseApproach>,
{
    match OutputFormat::from_path(path)? {
        OutputFormat::Csv => write_to_csv(results, path),
        OutputFormat::Json => write_to_json(results, path),
    }
}
