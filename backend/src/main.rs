//! Crop Yield Advisor - Backend Server
//!
//! A small web service for farmers: submit one field observation, get a
//! predicted yield and recommendations for improving it.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crop_yield_advisor_backend::services::{ModelState, Recommender};
use crop_yield_advisor_backend::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cya_server=debug,crop_yield_advisor_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Crop Yield Advisor Server");
    tracing::info!("Environment: {}", config.environment);

    // Load the model once; a failure is kept and answered on every request
    let model = ModelState::load(&config.model);
    if !model.is_ready() {
        tracing::warn!("Serving without a usable model; every prediction will report the load error");
    }

    // Pick the recommendation strategy
    let recommender = Recommender::from_env(&config.groq);
    match &recommender {
        Recommender::Ai(client) => {
            tracing::info!("Recommendations via Groq completions ({})", client.model());
        }
        Recommender::Heuristic => {
            tracing::warn!("GROQ_API_KEY not set; using rule-based recommendations");
        }
    }

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        model: Arc::new(model),
        recommender: Arc::new(recommender),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let host: IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
