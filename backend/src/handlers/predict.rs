//! Handlers for the prediction form

use axum::{extract::State, response::Html, Form};
use uuid::Uuid;

use shared::{FieldObservation, ObservationForm};

use crate::error::AppError;
use crate::render;
use crate::services::{ModelState, PredictionService};
use crate::AppState;

/// Empty prediction form handler
pub async fn show_form() -> Html<String> {
    render::predict_page(None, None, None)
}

/// Prediction submission handler.
///
/// Every outcome renders the same page with HTTP 200: a successful
/// prediction carries recommendations, a failed one carries an error
/// message in place of the result.
pub async fn handle_predict(
    State(state): State<AppState>,
    Form(form): Form<ObservationForm>,
) -> Html<String> {
    let request_id = Uuid::new_v4();

    // A model that never loaded answers every request with the load error,
    // before the submission is even parsed
    if let ModelState::Failed(message) = state.model.as_ref() {
        tracing::error!(
            "Request {} rejected, model unavailable: {}",
            request_id,
            message
        );
        let error = AppError::ModelLoad(message.clone());
        return render::predict_page(None, None, Some(&error.user_message()));
    }

    let observation = match FieldObservation::from_form(form) {
        Ok(observation) => observation,
        Err(e) => {
            tracing::debug!("Request {} had invalid input: {}", request_id, e);
            return render::predict_page(None, None, Some(&AppError::from(e).user_message()));
        }
    };

    let service = PredictionService::new(state.model.clone());
    let predicted_yield = match service.predict(&observation) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Request {} failed to predict: {}", request_id, e);
            return render::predict_page(None, None, Some(&e.user_message()));
        }
    };

    let recommendation = state
        .recommender
        .recommend(request_id, &observation, predicted_yield)
        .await;

    tracing::info!(
        "Request {} predicted {:.2} tons/hectare with {} recommendations",
        request_id,
        predicted_yield,
        recommendation.source.as_str()
    );

    render::predict_page(Some(predicted_yield), Some(&recommendation), None)
}
