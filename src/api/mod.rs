pub mod routes;
pub mod models;
pub mod errors;

use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::llm::ResearchProvider;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ResearchProvider>,
    pub strict_schema: bool,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route(
            "/api/generate",
            post(routes::generate::generate_report)
                .options(routes::generate::preflight)
                .fallback(routes::generate::method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
