pub mod fleet_routes;
pub mod session_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/session", session_routes::create_session_router())
        .nest("/api/fleet", fleet_routes::create_fleet_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Endpoint de salud simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "edutrack",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
