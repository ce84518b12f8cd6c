use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::client::SearchApi;

pub mod handlers;
pub mod models;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn SearchApi>,
}

pub fn create_router(api: Arc<dyn SearchApi>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/search", post(handlers::search_handler))
        .route("/api/preview", post(handlers::preview_handler))
        .route("/healthz", get(handlers::health_handler))
        .with_state(AppState { api })
        // Stylesheet for the page
        .nest_service("/static", ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
