//! Crop Yield Advisor - Backend Server
//!
//! Serves a crop yield prediction form backed by a trained regression
//! artifact, with AI-generated or rule-based growing recommendations.

use std::sync::Arc;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod render;
pub mod routes;
pub mod services;

pub use config::Config;

use services::{ModelState, Recommender};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub model: Arc<ModelState>,
    pub recommender: Arc<Recommender>,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::api_routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
