//! Command-line interface module.
//!
//! This module handles CLI argument parsing and the checks run on the
//! supplied paths before any data is loaded.

use crate::error::{Error, Result};
use crate::write::OutputFormat;
use clap::Parser;
use std::{io, path::PathBuf};

/// CLI arguments for exporting close approaches
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the CSV file of near-Earth objects.
    #[arg(short = 'n', long = "neofile", default_value = "data/neos.csv")]
    pub neofile: PathBuf,

    /// Path to the JSON file of close approaches.
    #[arg(short = 'c', long = "cadfile", default_value = "data/cad.json")]
    pub cadfile: PathBuf,

    /// File to write the close approaches to. Its extension (.csv or .json)
    /// picks the output format.
    #[arg(short = 'o', long = "outfile")]
    pub outfile: PathBuf,

    /// Log debug information to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Args {
    /// Checks that both input files exist and that the output format is known,
    /// before any data is loaded.
    ///
    /// # Errors
    /// - [`Error::Io`] with `NotFound` if an input path isn't a file
    /// - [`Error::UnsupportedFormat`] if the outfile extension is neither csv nor json
    pub fn validate(&self) -> Result<()> {
        for path in [&self.neofile, &self.cadfile] {
            if !path.is_file() {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("File '{}' doesn't exist or is not a valid file", path.display()),
                )));
            }
        }

        OutputFormat::from_path(&self.outfile)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_point_at_data_dir() {
        let args = Args::parse_from(["neo-approaches", "-o", "out.csv"]);
        assert_eq!(args.neofile, PathBuf::from("data/neos.csv"));
        assert_eq!(args.cadfile, PathBuf::from("data/cad.json"));
        assert!(!args.verbose);
    }

    #[test]
    fn outfile_is_required() {
        assert!(Args::try_parse_from(["neo-approaches"]).is_err());
    }

    #[test]
    fn validate_checks_inputs_and_format() {
        let dir = TempDir::new().unwrap();
        let neofile = dir.path().join("neos.csv");
        let cadfile = dir.path().join("cad.json");
        fs::write(&neofile, "pdes,name,diameter,pha\n").unwrap();

        let mut args = Args {
            neofile,
            cadfile: cadfile.clone(),
            outfile: dir.path().join("out.json"),
            verbose: false,
        };
        assert!(matches!(args.validate(), Err(Error::Io(_))));

        fs::write(&cadfile, r#"{"fields": [], "data": []}"#).unwrap();
        assert!(args.validate().is_ok());

        args.outfile = dir.path().join("out.xml");
        assert!(matches!(args.validate(), Err(Error::UnsupportedFormat(_))));
    }
}
