//! Data models and serialization helpers.
//!
//! This module contains the near-Earth object and close approach entities,
//! and the serde helpers used to read NASA data files and to render missing
//! values in exported files.
pub mod approach;
pub mod neo;
pub mod serde_helpers;

pub use approach::CloseApproach;
pub use neo::NearEarthObject;
