//! Custom serde helpers for the NASA data files and the CSV export.
//!
//! Deserializers normalize raw JPL values on the way in; serializers render
//! missing data with fixed literals on the way out, so that an unknown value
//! never looks like an empty one.

use serde::{Deserialize, Deserializer, Serializer};

/// Text rendering of an NEO without an IAU name.
pub const NO_NAME: &str = "None";

/// Text rendering of an unknown diameter.
pub const NAN_LITERAL: &str = "nan";

/// Deserializes the `data` rows of a `cad.json` file.
///
/// JPL emits `null` for values it doesn't have; those become empty strings so
/// every row has one string per field.
///
/// # Examples
/// ```text
/// Input:  [["433", "2020-Jan-01 00:00", null]]
/// Output: vec![vec!["433", "2020-Jan-01 00:00", ""]]
/// ```
pub fn null_cells_as_empty<'a, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'a>,
{
    let rows: Vec<Vec<Option<String>>> = Vec::deserialize(deserializer)?;
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(Option::unwrap_or_default).collect())
        .collect())
}

/// Serializes an optional name, writing [`NO_NAME`] when absent.
pub fn name_or_marker<S>(name: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(name.as_deref().unwrap_or(NO_NAME))
}

/// Renders a float the way the CSV format spells numbers.
///
/// Shortest round-trip digits, with a trailing `.0` for whole numbers and
/// scientific notation with a signed two-digit exponent outside
/// `1e-4 <= |value| < 1e16`. NaN and infinities become `nan`, `inf`, `-inf`.
///
/// # Examples
/// ```text
/// 0.45     -> "0.45"
/// 2.0      -> "2.0"
/// 1e-7     -> "1e-07"
/// 1.5e20   -> "1.5e+20"
/// ```
pub fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return NAN_LITERAL.to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or_default()),
        None => (scientific.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        let plain = value.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    }
}

/// Serializes a float as text with [`float_repr`], writing [`NAN_LITERAL`] for NaN.
pub fn float_as_text<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&float_repr(*value))
}

/// Serializes a float, writing `null` for NaN (JSON has no NaN).
pub fn nan_as_null<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_nan() {
        serializer.serialize_none()
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Serializes a flag as `True` / `False`, the spelling of the CSV format.
pub fn capitalized_bool<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *value { "True" } else { "False" })
}
