//! Near-Earth objects, their close approaches to Earth, and export of those
//! approaches to CSV or JSON.
//!
//! The usual pipeline loads both NASA data files with [`extract`], links them
//! in a [`database::NeoDatabase`], and hands the approaches to one of the
//! writers in [`write`].

pub mod database;
pub mod error;
pub mod extract;
pub mod helpers;
pub mod models;
pub mod ui;
pub mod write;

pub use database::NeoDatabase;
pub use error::{Error, Result};
pub use models::{CloseApproach, NearEarthObject};
pub use write::{write_results, write_to_csv, write_to_json};
