//! Saloon Backend
//!
//! REST backend for saloon registration, login and setup, persisted as a JSON snapshot.

mod api;
mod config;
mod errors;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use store::SaloonStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SaloonStore>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Saloon Backend");
    tracing::info!("Snapshot path: {:?}", config.snapshot_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize store; an unparsable snapshot aborts startup
    let store = Arc::new(store::init_store(&config.snapshot_path).await?);
    tracing::info!("Loaded {} saloons", store.list_all().await.len());

    let app = create_router(AppState { store });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        // Accounts
        .route("/createSaloon", post(api::create_saloon))
        .route("/viewAllSaloons", get(api::view_all_saloons))
        .route("/editSaloon/{id}", put(api::edit_saloon))
        .route("/loginSaloon", post(api::login_saloon))
        .route("/getSaloonData/{saloonId}", get(api::get_saloon_data))
        // Setup
        .route("/createSaloonSetup", post(api::create_saloon_setup))
        .route("/viewAllSaloonsData", get(api::view_all_saloons_data))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root greeting.
async fn welcome() -> &'static str {
    "Welcome to the Saloon API!"
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
