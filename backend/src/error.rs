//! Error handling for the Crop Yield Advisor
//!
//! Every failure a request can hit collapses into one farmer-facing error
//! string on the rendered page; no structured error payload leaves the
//! service.

use thiserror::Error;

use shared::{ModelError, ParseError};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// A form field could not be coerced
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The model artifact failed to load; cached for the process lifetime
    #[error("Model unavailable: {0}")]
    ModelLoad(String),

    /// The loaded model rejected the input row
    #[error("Prediction failed: {0}")]
    Prediction(#[from] ModelError),

    /// The completion API failed; recovered internally, never rendered
    #[error("AI service error: {0}")]
    AiService(String),
}

impl AppError {
    /// The single string shown to the farmer on the rendered page
    pub fn user_message(&self) -> String {
        match self {
            AppError::Parse(err) => format!("Error: {}", err),
            AppError::ModelLoad(message) => format!("Error: {}", message),
            AppError::Prediction(err) => format!("Error: {}", err),
            AppError::AiService(detail) => format!("Error: {}", detail),
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
