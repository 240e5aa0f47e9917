//! Route definitions for the Crop Yield Advisor

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create application routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Prediction form (GET) and submission (POST)
        .route(
            "/",
            get(handlers::show_form).post(handlers::handle_predict),
        )
        // Health check
        .route("/health", get(handlers::health_check))
}
