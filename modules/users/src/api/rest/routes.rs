use axum::{
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Build the module router with the service injected as an extension.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/users", post(handlers::create_user))
        .route(
            "/users/{id}",
            get(handlers::get_user).put(handlers::update_user),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(service))
}
