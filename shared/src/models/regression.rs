//! Yield regression model
//!
//! The model arrives as a serialized artifact: the fitted parameters of a
//! linear pipeline exported after training. Evaluation is an intercept plus
//! per-column terms: numeric coefficients, flag coefficients, and a one-hot
//! coefficient per known categorical level. Anything the pipeline was not
//! trained on (an unknown level, a missing column) is rejected rather than
//! guessed at.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Column names the model was trained on
pub const COL_REGION: &str = "Region";
pub const COL_CROP: &str = "Crop";
pub const COL_SOIL_TYPE: &str = "Soil_Type";
pub const COL_RAINFALL_MM: &str = "Rainfall_mm";
pub const COL_TEMPERATURE_CELSIUS: &str = "Temperature_Celsius";
pub const COL_FERTILIZER_USED: &str = "Fertilizer_Used";
pub const COL_IRRIGATION_USED: &str = "Irrigation_Used";
pub const COL_WEATHER_CONDITION: &str = "Weather_Condition";
pub const COL_DAYS_TO_HARVEST: &str = "Days_to_Harvest";

/// One cell of a prediction input row
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Flag(bool),
    Category(Option<String>),
}

/// A named-column input row; column order never matters, names must match
/// the training columns exactly
pub type InputRow = BTreeMap<String, CellValue>;

/// Deserialized yield regression artifact
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct YieldModel {
    pub metadata: ModelMetadata,
    pub intercept: f64,
    /// Coefficient per numeric column, applied to the cell value
    pub numeric_terms: BTreeMap<String, f64>,
    /// Coefficient per flag column, applied when the flag is set
    pub flag_terms: BTreeMap<String, f64>,
    /// One-hot coefficient per known level of each categorical column
    pub categorical_terms: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Training provenance carried inside the artifact
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelMetadata {
    pub name: String,
    pub version: String,
    pub trained_at: DateTime<Utc>,
    pub r_squared: f64,
    pub training_rows: u64,
}

/// Why the model rejected an input row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("input row is missing column '{0}'")]
    MissingColumn(String),
    #[error("no value provided for '{column}'")]
    MissingValue { column: String },
    #[error("unknown {column} value '{value}'")]
    UnknownCategory { column: String, value: String },
    #[error("column '{column}' expects a {expected} value")]
    WrongType {
        column: String,
        expected: &'static str,
    },
}

impl YieldModel {
    /// Evaluate the fitted pipeline over a batch of rows
    ///
    /// Returns one prediction per row, in row order. Columns the model was
    /// not trained on are ignored; every trained column must be present.
    pub fn predict_batch(&self, rows: &[InputRow]) -> Result<Vec<f64>, ModelError> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }

    fn predict_row(&self, row: &InputRow) -> Result<f64, ModelError> {
        let mut total = self.intercept;

        for (column, coefficient) in &self.numeric_terms {
            match row.get(column) {
                Some(CellValue::Number(value)) => total += coefficient * value,
                Some(_) => {
                    return Err(ModelError::WrongType {
                        column: column.clone(),
                        expected: "numeric",
                    })
                }
                None => return Err(ModelError::MissingColumn(column.clone())),
            }
        }

        for (column, coefficient) in &self.flag_terms {
            match row.get(column) {
                Some(CellValue::Flag(true)) => total += coefficient,
                Some(CellValue::Flag(false)) => {}
                Some(_) => {
                    return Err(ModelError::WrongType {
                        column: column.clone(),
                        expected: "flag",
                    })
                }
                None => return Err(ModelError::MissingColumn(column.clone())),
            }
        }

        for (column, levels) in &self.categorical_terms {
            match row.get(column) {
                Some(CellValue::Category(Some(value))) => match levels.get(value) {
                    Some(coefficient) => total += coefficient,
                    None => {
                        return Err(ModelError::UnknownCategory {
                            column: column.clone(),
                            value: value.clone(),
                        })
                    }
                },
                Some(CellValue::Category(None)) => {
                    return Err(ModelError::MissingValue {
                        column: column.clone(),
                    })
                }
                Some(_) => {
                    return Err(ModelError::WrongType {
                        column: column.clone(),
                        expected: "categorical",
                    })
                }
                None => return Err(ModelError::MissingColumn(column.clone())),
            }
        }

        Ok(total)
    }
}
