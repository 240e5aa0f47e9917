//! Yield prediction service backed by the trained regression artifact

use std::path::{Path, PathBuf};
use std::sync::Arc;

use shared::{
    CellValue, FieldObservation, InputRow, YieldModel, COL_CROP, COL_DAYS_TO_HARVEST,
    COL_FERTILIZER_USED, COL_IRRIGATION_USED, COL_RAINFALL_MM, COL_REGION, COL_SOIL_TYPE,
    COL_TEMPERATURE_CELSIUS, COL_WEATHER_CONDITION,
};

use crate::config::ModelConfig;
use crate::error::{AppError, AppResult};

/// Outcome of the single artifact load attempt made at startup.
///
/// The process never retries a failed load: the failure message is kept
/// for the lifetime of the process and reported on every prediction.
#[derive(Debug)]
pub enum ModelState {
    Ready(YieldModel),
    Failed(String),
}

impl ModelState {
    /// Load the model artifact from the configured path
    pub fn load(config: &ModelConfig) -> Self {
        let path = resolve_artifact_path(&config.path);
        match read_artifact(&path) {
            Ok(model) => {
                tracing::info!(
                    "Loaded yield model '{}' v{} from {} (r2={}, trained on {} rows)",
                    model.metadata.name,
                    model.metadata.version,
                    path.display(),
                    model.metadata.r_squared,
                    model.metadata.training_rows
                );
                ModelState::Ready(model)
            }
            Err(message) => {
                tracing::error!("Failed to load yield model: {}", message);
                ModelState::Failed(message)
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ModelState::Ready(_))
    }
}

fn read_artifact(path: &Path) -> Result<YieldModel, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read model artifact at {}: {}", path.display(), e))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("model artifact at {} is not valid: {}", path.display(), e))
}

/// Resolve a relative artifact path against the executable's directory,
/// falling back to the working directory
fn resolve_artifact_path(configured: &str) -> PathBuf {
    let configured = Path::new(configured);
    if configured.is_absolute() {
        return configured.to_path_buf();
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join(configured);
            if candidate.exists() {
                return candidate;
            }
        }
    }
    configured.to_path_buf()
}

/// Runs the loaded model over typed field observations
#[derive(Clone)]
pub struct PredictionService {
    model: Arc<ModelState>,
}

impl PredictionService {
    pub fn new(model: Arc<ModelState>) -> Self {
        Self { model }
    }

    /// Predict the crop yield for one observation, in tons per hectare
    /// rounded to two decimal places
    pub fn predict(&self, observation: &FieldObservation) -> AppResult<f64> {
        let model = match self.model.as_ref() {
            ModelState::Ready(model) => model,
            ModelState::Failed(message) => return Err(AppError::ModelLoad(message.clone())),
        };

        let row = build_input_row(observation);
        let predictions = model.predict_batch(std::slice::from_ref(&row))?;
        let raw = predictions
            .into_iter()
            .next()
            .expect("one prediction per input row");
        Ok(round_to_cents(raw))
    }
}

/// Arrange an observation into the column layout the model was trained on
fn build_input_row(observation: &FieldObservation) -> InputRow {
    InputRow::from([
        (
            COL_REGION.to_string(),
            CellValue::Category(observation.region.clone()),
        ),
        (
            COL_CROP.to_string(),
            CellValue::Category(observation.crop.clone()),
        ),
        (
            COL_SOIL_TYPE.to_string(),
            CellValue::Category(observation.soil_type.clone()),
        ),
        (
            COL_RAINFALL_MM.to_string(),
            CellValue::Number(observation.rainfall_mm),
        ),
        (
            COL_TEMPERATURE_CELSIUS.to_string(),
            CellValue::Number(observation.temperature_celsius),
        ),
        (
            COL_FERTILIZER_USED.to_string(),
            CellValue::Flag(observation.fertilizer_used),
        ),
        (
            COL_IRRIGATION_USED.to_string(),
            CellValue::Flag(observation.irrigation_used),
        ),
        (
            COL_WEATHER_CONDITION.to_string(),
            CellValue::Category(observation.weather.clone()),
        ),
        (
            COL_DAYS_TO_HARVEST.to_string(),
            CellValue::Number(observation.days_to_harvest),
        ),
    ])
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
