//! Loading of the NASA data files.
//!
//! `neos.csv` holds one NEO per row with a header naming every column;
//! `cad.json` holds close approaches as a `fields` list of column names and a
//! `data` list of rows, all values being strings.

use crate::error::{Error, Result};
use crate::models::serde_helpers::null_cells_as_empty;
use crate::models::{CloseApproach, NearEarthObject};
use serde::Deserialize;
use std::{fs::File, io::BufReader, path::Path};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct NeoRecord {
    pdes: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    diameter: String,
    #[serde(default)]
    pha: String,
}

#[derive(Debug, Deserialize)]
struct CadFile {
    fields: Vec<String>,
    #[serde(default, deserialize_with = "null_cells_as_empty")]
    data: Vec<Vec<String>>,
}

/// Column positions of the `cad.json` fields a close approach is built from.
struct CadColumns {
    designation: usize,
    calendar_date: usize,
    distance: usize,
    velocity: usize,
}

impl CadColumns {
    fn resolve(fields: &[String]) -> Result<Self> {
        let position = |name: &'static str| {
            fields
                .iter()
                .position(|f| f == name)
                .ok_or(Error::MissingField(name))
        };

        Ok(CadColumns {
            designation: position("des")?,
            calendar_date: position("cd")?,
            distance: position("dist")?,
            velocity: position("v_rel")?,
        })
    }
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or_default()
}

/// Reads near-Earth objects from a `neos.csv` file.
///
/// Only the `pdes`, `name`, `diameter` and `pha` columns are used. Fails on
/// the first row that can't be read or whose diameter isn't a number.
pub fn load_neos(path: &Path) -> Result<Vec<NearEarthObject>> {
    debug!(path = %path.display(), "loading near-Earth objects");

    let mut csv_reader = csv::ReaderBuilder::new().from_path(path)?;
    let neos = csv_reader
        .deserialize::<NeoRecord>()
        .map(|record| {
            let record = record?;
            NearEarthObject::new(&record.pdes, &record.name, &record.diameter, &record.pha)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(count = neos.len(), "near-Earth objects loaded");
    Ok(neos)
}

/// Reads close approaches from a `cad.json` file.
///
/// Column positions are taken from the file's `fields` list; `des`, `cd`,
/// `dist` and `v_rel` must all be present. Fails on the first row with a bad
/// date or a non-numeric distance or velocity.
pub fn load_approaches(path: &Path) -> Result<Vec<CloseApproach>> {
    debug!(path = %path.display(), "loading close approaches");

    let cad: CadFile = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    let columns = CadColumns::resolve(&cad.fields)?;

    let approaches = cad
        .data
        .iter()
        .map(|row| {
            CloseApproach::new(
                cell(row, columns.designation),
                cell(row, columns.calendar_date),
                cell(row, columns.distance),
                cell(row, columns.velocity),
            )
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(count = approaches.len(), "close approaches loaded");
    Ok(approaches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const NEOS_CSV: &str = "\
id,spkid,full_name,pdes,name,prefix,neo,pha,diameter
a0000433,2000433,\"   433 Eros (A898 PA)\",433,Eros,,Y,N,16.84
bK20A00B,54000001,\"       (2020 AB)\",2020 AB,,,Y,,
";

    const CAD_JSON: &str = r#"{
  "signature": {"source": "NASA/JPL SBDB Close Approach Data API", "version": "1.1"},
  "count": "2",
  "fields": ["des", "orbit_id", "jd", "cd", "dist", "dist_min", "dist_max", "v_rel", "v_inf", "t_sigma_f", "h"],
  "data": [
    ["433", "659", "2415020.507669610", "1900-Jan-01 00:11", "0.0921795123769547", "0.0912", "0.0931", "16.7523040362574", "16.7505784933163", "01:00", null],
    ["2020 AB", "4", "2458849.5", "2020-Jan-01 00:00", "0.45", "0.44", "0.46", "13.2", "13.1", "< 00:01", "25.1"]
  ]
}"#;

    fn write_fixture(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_neos_by_column_name() {
        let dir = TempDir::new().unwrap();
        let neos = load_neos(&write_fixture(&dir, "neos.csv", NEOS_CSV)).unwrap();

        assert_eq!(neos.len(), 2);
        assert_eq!(neos[0].designation, "433");
        assert_eq!(neos[0].name.as_deref(), Some("Eros"));
        assert_eq!(neos[0].diameter, 16.84);
        assert!(!neos[0].hazardous);

        assert_eq!(neos[1].designation, "2020 AB");
        assert_eq!(neos[1].name, None);
        assert!(neos[1].diameter.is_nan());
    }

    #[test]
    fn loads_approaches_by_field_name() {
        let dir = TempDir::new().unwrap();
        let approaches = load_approaches(&write_fixture(&dir, "cad.json", CAD_JSON)).unwrap();

        assert_eq!(approaches.len(), 2);
        assert_eq!(approaches[0].designation(), "433");
        assert_eq!(approaches[0].time_str(), "1900-01-01 00:11");
        assert_eq!(approaches[1].distance, 0.45);
        assert_eq!(approaches[1].velocity, 13.2);
    }

    #[test]
    fn missing_cad_field_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "cad.json",
            r#"{"fields": ["des", "cd", "dist"], "data": []}"#,
        );
        let err = load_approaches(&path).unwrap_err();
        assert!(matches!(err, Error::MissingField("v_rel")));
    }

    #[test]
    fn bad_distance_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "cad.json",
            r#"{"fields": ["des", "cd", "dist", "v_rel"], "data": [["433", "1900-Jan-01 00:11", null, "16.75"]]}"#,
        );
        let err = load_approaches(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { field: "distance", .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_approaches(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
