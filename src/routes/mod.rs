use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};
use crate::services::Recommender;

pub mod categories;
pub mod recommendations;

/// Shared application state
pub struct AppState {
    pub recommender: Arc<Recommender>,
    /// Ids returned when the request does not specify a count
    pub default_count: usize,
    pub rng: Mutex<StdRng>,
}

impl AppState {
    /// Wraps a loaded recommender; a seed makes sampling reproducible
    pub fn new(recommender: Recommender, default_count: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            recommender: Arc::new(recommender),
            default_count,
            rng: Mutex::new(rng),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/recommend", post(recommendations::recommend))
        .route("/categories", get(categories::list))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
