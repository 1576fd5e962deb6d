use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub top_rated: String,
}

/// Lists the category names the recommender understands
pub async fn list(State(state): State<Arc<AppState>>) -> Json<CategoriesResponse> {
    let table = state.recommender.categories();
    Json(CategoriesResponse {
        categories: table.names().map(str::to_string).collect(),
        top_rated: table.top_rated_name().to_string(),
    })
}
