//! Field observation models
//!
//! A submission arrives as raw form strings and is coerced into a typed
//! [`FieldObservation`] before anything downstream sees it. Coercion is
//! all-or-nothing: one bad numeric field fails the whole submission.

use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::validation::{is_affirmative, validate_finite};

/// Raw form fields exactly as submitted
///
/// Every field is optional so that a partial submission still deserializes;
/// the gaps are handled during coercion, not at the wire boundary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObservationForm {
    pub region: Option<String>,
    pub crop: Option<String>,
    pub soil_type: Option<String>,
    pub rainfall: Option<String>,
    pub temperature: Option<String>,
    pub fertilizer_used: Option<String>,
    pub irrigation_used: Option<String>,
    pub weather: Option<String>,
    pub days_to_harvest: Option<String>,
}

/// One farmer's measurements for a single field and season
///
/// Text fields carry no server-side default: an absent field stays `None`
/// and is passed through unchanged to the model layer, which may reject it.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct FieldObservation {
    pub region: Option<String>,
    pub crop: Option<String>,
    pub soil_type: Option<String>,
    #[validate(range(min = 0.0))]
    pub rainfall_mm: f64,
    pub temperature_celsius: f64,
    pub fertilizer_used: bool,
    pub irrigation_used: bool,
    pub weather: Option<String>,
    #[validate(range(min = 0.0))]
    pub days_to_harvest: f64,
}

/// Why a raw submission could not be coerced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing value for '{0}'")]
    MissingNumber(&'static str),
    #[error("'{value}' is not a valid number for '{field}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("'{field}' must not be negative")]
    OutOfRange { field: &'static str },
}

impl FieldObservation {
    /// Coerce a raw submission into a typed observation
    ///
    /// Numeric fields are trimmed and parsed as `f64`; flag fields follow
    /// the exact-"Yes" rule; text fields pass through untouched.
    pub fn from_form(form: ObservationForm) -> Result<Self, ParseError> {
        let rainfall_mm = parse_number("rainfall", form.rainfall.as_deref())?;
        let temperature_celsius = parse_number("temperature", form.temperature.as_deref())?;
        let days_to_harvest = parse_number("days_to_harvest", form.days_to_harvest.as_deref())?;

        let observation = Self {
            region: form.region,
            crop: form.crop,
            soil_type: form.soil_type,
            rainfall_mm,
            temperature_celsius,
            fertilizer_used: is_affirmative(form.fertilizer_used.as_deref()),
            irrigation_used: is_affirmative(form.irrigation_used.as_deref()),
            weather: form.weather,
            days_to_harvest,
        };

        observation.validate().map_err(|errors| {
            let field = errors
                .field_errors()
                .keys()
                .next()
                .copied()
                .unwrap_or("observation");
            ParseError::OutOfRange {
                field: form_field_name(field),
            }
        })?;

        Ok(observation)
    }
}

/// Validator errors key on struct field names; messages use the form's names
fn form_field_name(field: &'static str) -> &'static str {
    match field {
        "rainfall_mm" => "rainfall",
        "temperature_celsius" => "temperature",
        _ => field,
    }
}

fn parse_number(field: &'static str, raw: Option<&str>) -> Result<f64, ParseError> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Err(ParseError::MissingNumber(field)),
    };
    let value: f64 = raw.trim().parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;
    validate_finite(value).map_err(|_| ParseError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;
    Ok(value)
}
