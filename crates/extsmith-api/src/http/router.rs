//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`. Middleware: CORS, tracing.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Session lifecycle
        .route("/sessions", post(handlers::session::create_session))
        .route("/sessions/{id}", get(handlers::session::get_session))
        .route(
            "/sessions/{id}/credentials",
            put(handlers::session::set_credentials),
        )
        .route("/sessions/{id}/model", put(handlers::session::select_model))
        // Conversation
        .route("/sessions/{id}/messages", post(handlers::chat::post_message))
        .route("/sessions/{id}/models", get(handlers::chat::list_models))
        // Bundle generation
        .route("/sessions/{id}/generate", post(handlers::bundle::generate))
        .route("/sessions/{id}/bundle", get(handlers::bundle::download));

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
