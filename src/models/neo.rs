use super::approach::CloseApproach;
use super::serde_helpers::{NAN_LITERAL, NO_NAME};
use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Flag value marking an NEO as potentially hazardous.
const HAZARDOUS_FLAG: &str = "Y";

/// A near-Earth object (NEO).
///
/// Holds the primary designation (required, unique), the IAU name (optional),
/// the diameter in kilometers (NaN when unknown) and whether NASA marks the
/// object as potentially hazardous.
///
/// `approaches` starts empty and is filled once by
/// [`NeoDatabase::new`](crate::database::NeoDatabase::new).
pub struct NearEarthObject {
    pub designation: String,
    pub name: Option<String>,
    pub diameter: f64,
    pub hazardous: bool,
    pub approaches: Vec<Arc<CloseApproach>>,
}

impl NearEarthObject {
    /// Builds an NEO from the raw column values of `neos.csv`.
    ///
    /// An empty `name` becomes `None` and an empty `diameter` becomes NaN.
    /// Fails only when a non-empty `diameter` is not a number.
    pub fn new(designation: &str, name: &str, diameter: &str, hazardous: &str) -> Result<Self> {
        let name = (!name.is_empty()).then(|| name.to_string());
        let diameter = if diameter.is_empty() {
            f64::NAN
        } else {
            diameter
                .trim()
                .parse::<f64>()
                .map_err(|e| Error::invalid_number("diameter", diameter, e))?
        };

        Ok(NearEarthObject {
            designation: designation.to_string(),
            name,
            diameter,
            hazardous: hazardous == HAZARDOUS_FLAG,
            approaches: Vec::new(),
        })
    }

    /// `"<designation> (<name>)"`, e.g. `"433 (Eros)"` or `"2020 AB (None)"`.
    pub fn fullname(&self) -> String {
        format!("{} ({})", self.designation, self.name_or_marker())
    }

    /// Name as displayed in text, `None` when unnamed.
    pub fn name_or_marker(&self) -> &str {
        self.name.as_deref().unwrap_or(NO_NAME)
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hazard = if self.hazardous { "is" } else { "is not" };
        let diameter = if self.diameter.is_nan() {
            NAN_LITERAL.to_string()
        } else {
            format!("{:.3}", self.diameter)
        };
        write!(
            f,
            "A NearEarthObject {} has a diameter of {} km and {} potentially hazardous.",
            self.fullname(),
            diameter,
            hazard
        )
    }
}

impl fmt::Debug for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NearEarthObject")
            .field("designation", &self.designation)
            .field("name", &self.name)
            .field("diameter", &self.diameter)
            .field("hazardous", &self.hazardous)
            .field("approaches", &self.approaches.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hazardous_only_for_exact_flag() {
        let cases = [("Y", true), ("N", false), ("", false), ("y", false), ("YES", false)];
        for (flag, expected) in cases {
            let neo = NearEarthObject::new("433", "Eros", "16.84", flag).unwrap();
            assert_eq!(neo.hazardous, expected, "flag {flag:?}");
        }
    }

    #[test]
    fn empty_diameter_is_nan() {
        let neo = NearEarthObject::new("2020 AB", "", "", "N").unwrap();
        assert!(neo.diameter.is_nan());
    }

    #[test]
    fn numeric_diameter_is_parsed() {
        let neo = NearEarthObject::new("2020 AB", "", "1.5", "N").unwrap();
        assert_eq!(neo.diameter, 1.5);
    }

    #[test]
    fn non_numeric_diameter_fails() {
        let err = NearEarthObject::new("2020 AB", "", "big", "N").unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { field: "diameter", .. }));
    }

    #[test]
    fn empty_name_is_none() {
        let neo = NearEarthObject::new("2020 AB", "", "", "N").unwrap();
        assert_eq!(neo.name, None);
        assert_eq!(neo.name_or_marker(), "None");
        assert!(neo.approaches.is_empty());
    }

    #[test]
    fn fullname_with_and_without_name() {
        let eros = NearEarthObject::new("433", "Eros", "16.84", "N").unwrap();
        assert_eq!(eros.fullname(), "433 (Eros)");

        let unnamed = NearEarthObject::new("2020 AB", "", "", "N").unwrap();
        assert_eq!(unnamed.fullname(), "2020 AB (None)");
    }

    #[test]
    fn display_mentions_hazard() {
        let neo = NearEarthObject::new("99942", "Apophis", "0.37", "Y").unwrap();
        assert_eq!(
            neo.to_string(),
            "A NearEarthObject 99942 (Apophis) has a diameter of 0.370 km and is potentially hazardous."
        );
    }

    #[test]
    fn display_unnamed_with_unknown_diameter() {
        let neo = NearEarthObject::new("2020 AB", "", "", "N").unwrap();
        assert_eq!(
            neo.to_string(),
            "A NearEarthObject 2020 AB (None) has a diameter of nan km and is not potentially hazardous."
        );
    }
}
