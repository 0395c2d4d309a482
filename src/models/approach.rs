use super::neo::NearEarthObject;
use crate::error::{Error, Result};
use crate::helpers::{Calendar, NasaCalendar};
use chrono::NaiveDateTime;
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

/// A close approach to Earth by an NEO.
///
/// Holds the date and time (UTC) of closest approach, the nominal approach
/// distance in astronomical units and the relative approach velocity in
/// kilometers per second.
///
/// The owning NEO is only known by designation at construction time. The
/// back-reference is resolved once, when the approach is attached to its
/// [`NearEarthObject`], and never changes afterwards.
pub struct CloseApproach {
    designation: String,
    pub time: NaiveDateTime,
    pub distance: f64,
    pub velocity: f64,
    neo: OnceLock<Weak<NearEarthObject>>,
}

impl CloseApproach {
    /// Builds a close approach from the raw column values of `cad.json`.
    pub fn new(
        designation: &str,
        calendar_date: &str,
        distance: &str,
        velocity: &str,
    ) -> Result<Self> {
        Self::with_calendar(designation, calendar_date, distance, velocity, &NasaCalendar)
    }

    /// Same as [`CloseApproach::new`], parsing the date with `calendar`.
    ///
    /// Distance and velocity are required: empty or non-numeric values fail.
    pub fn with_calendar(
        designation: &str,
        calendar_date: &str,
        distance: &str,
        velocity: &str,
        calendar: &impl Calendar,
    ) -> Result<Self> {
        let time = calendar.parse(calendar_date)?;
        let distance = distance
            .trim()
            .parse::<f64>()
            .map_err(|e| Error::invalid_number("distance", distance, e))?;
        let velocity = velocity
            .trim()
            .parse::<f64>()
            .map_err(|e| Error::invalid_number("velocity", velocity, e))?;

        Ok(CloseApproach {
            designation: designation.to_string(),
            time,
            distance,
            velocity,
            neo: OnceLock::new(),
        })
    }

    /// Designation of the NEO this approach belongs to.
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// The linked NEO, if the approach has been attached to one that is still alive.
    pub fn neo(&self) -> Option<Arc<NearEarthObject>> {
        self.neo.get().and_then(Weak::upgrade)
    }

    /// Like [`CloseApproach::neo`], failing with [`Error::UnlinkedApproach`].
    pub fn linked_neo(&self) -> Result<Arc<NearEarthObject>> {
        self.neo()
            .ok_or_else(|| Error::UnlinkedApproach(self.designation.clone()))
    }

    pub fn is_linked(&self) -> bool {
        self.neo().is_some()
    }

    /// Points this approach back at its NEO. Can be done only once.
    pub(crate) fn link(&self, neo: &Arc<NearEarthObject>) -> Result<()> {
        self.neo
            .set(Arc::downgrade(neo))
            .map_err(|_| Error::AlreadyLinked(self.designation.clone()))
    }

    /// `"<designation> (<neo name>)"`; the NEO must be linked.
    pub fn fullname(&self) -> Result<String> {
        let neo = self.linked_neo()?;
        Ok(format!("{} ({})", self.designation, neo.name_or_marker()))
    }

    /// Approach time to minute precision, e.g. `"2020-01-01 00:00"`.
    pub fn time_str(&self) -> String {
        self.time_str_with(&NasaCalendar)
    }

    pub fn time_str_with(&self, calendar: &impl Calendar) -> String {
        calendar.format(&self.time)
    }
}

impl AsRef<CloseApproach> for CloseApproach {
    fn as_ref(&self) -> &CloseApproach {
        self
    }
}

impl fmt::Display for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fullname = self
            .fullname()
            .unwrap_or_else(|_| self.designation.clone());
        write!(
            f,
            "On {}, {} approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            fullname,
            self.distance,
            self.velocity
        )
    }
}

impl fmt::Debug for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseApproach")
            .field("designation", &self.designation)
            .field("time", &self.time_str())
            .field("distance", &self.distance)
            .field("velocity", &self.velocity)
            .field("linked", &self.is_linked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCalendar(NaiveDateTime);

    impl Calendar for FixedCalendar {
        fn parse(&self, _calendar_date: &str) -> Result<NaiveDateTime> {
            Ok(self.0)
        }

        fn format(&self, _time: &NaiveDateTime) -> String {
            "fixed".to_string()
        }
    }

    #[test]
    fn parses_required_fields() {
        let ca = CloseApproach::new("2020 AB", "2020-Jan-01 00:00", "0.45", "13.2").unwrap();
        assert_eq!(ca.designation(), "2020 AB");
        assert_eq!(ca.distance, 0.45);
        assert_eq!(ca.velocity, 13.2);
        assert_eq!(ca.time_str(), "2020-01-01 00:00");
        assert!(!ca.is_linked());
    }

    #[test]
    fn empty_distance_fails() {
        let err = CloseApproach::new("2020 AB", "2020-Jan-01 00:00", "", "13.2").unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { field: "distance", .. }));
    }

    #[test]
    fn non_numeric_velocity_fails() {
        let err = CloseApproach::new("2020 AB", "2020-Jan-01 00:00", "0.45", "fast").unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { field: "velocity", .. }));
    }

    #[test]
    fn malformed_date_fails() {
        let err = CloseApproach::new("2020 AB", "01/01/2020", "0.45", "13.2").unwrap_err();
        assert!(matches!(err, Error::InvalidDate { .. }));
    }

    #[test]
    fn time_str_ignores_seconds() {
        let a = CloseApproach::new("2020 AB", "2020-Jan-01 10:42", "0.45", "13.2").unwrap();
        let b = CloseApproach::new("2020 AB", "2020-Jan-01 10:42:37.5", "0.45", "13.2").unwrap();
        assert_eq!(a.time_str(), b.time_str());
        assert_ne!(a.time, b.time);
    }

    #[test]
    fn uses_injected_calendar() {
        let instant = chrono::NaiveDate::from_ymd_opt(1999, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        let calendar = FixedCalendar(instant);
        let ca = CloseApproach::with_calendar("433", "anything", "0.1", "5", &calendar).unwrap();
        assert_eq!(ca.time, instant);
        assert_eq!(ca.time_str_with(&calendar), "fixed");
    }

    #[test]
    fn fullname_requires_link() {
        let ca = CloseApproach::new("2020 AB", "2020-Jan-01 00:00", "0.45", "13.2").unwrap();
        assert!(matches!(ca.fullname(), Err(Error::UnlinkedApproach(_))));
    }

    #[test]
    fn link_is_set_once() {
        let neo = Arc::new(NearEarthObject::new("2020 AB", "", "", "N").unwrap());
        let ca = CloseApproach::new("2020 AB", "2020-Jan-01 00:00", "0.45", "13.2").unwrap();

        ca.link(&neo).unwrap();
        assert_eq!(ca.fullname().unwrap(), "2020 AB (None)");
        assert!(matches!(ca.link(&neo), Err(Error::AlreadyLinked(_))));
    }

    #[test]
    fn display_unlinked_falls_back_to_designation() {
        let ca = CloseApproach::new("2020 AB", "2020-Jan-01 00:00", "0.45", "13.2").unwrap();
        assert_eq!(
            ca.to_string(),
            "On 2020-01-01 00:00, 2020 AB approaches Earth at a distance of 0.45 au and a velocity of 13.20 km/s."
        );
    }
}
