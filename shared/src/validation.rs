//! Validation utilities for the Crop Yield Advisor
//!
//! Form submissions arrive as raw strings; these helpers cover the parts of
//! field coercion that are not plain `f64` parsing.

/// Validate that a parsed number is usable as a measurement
pub fn validate_finite(value: f64) -> Result<(), &'static str> {
    if value.is_finite() {
        Ok(())
    } else {
        Err("Value must be a finite number")
    }
}

/// Check whether a raw form flag is set
///
/// The submission forms send checkbox-style fields as the literal "Yes".
/// Only that exact string counts as set; any other value, including absence,
/// does not.
pub fn is_affirmative(raw: Option<&str>) -> bool {
    raw == Some("Yes")
}
