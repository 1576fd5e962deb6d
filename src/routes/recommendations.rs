use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{CategorySelection, FilterCriteria, Recommendation},
    routes::AppState,
};

/// Questionnaire answers; every field is optional
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationRequest {
    pub mood: Option<String>,
    pub genre: Option<Vec<String>>,
    pub occasion: Option<String>,
    pub age: Option<String>,
    pub category: Option<CategorySelection>,
    pub num_recommendations: Option<usize>,
}

impl RecommendationRequest {
    fn criteria(self) -> FilterCriteria {
        FilterCriteria::from_labels(
            self.mood.as_deref(),
            self.genre.unwrap_or_default(),
            self.occasion.as_deref(),
            self.age.as_deref(),
            self.category,
        )
    }
}

/// Handler for recommendation endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<Recommendation>> {
    let Json(request) = payload?;
    let count = request.num_recommendations.unwrap_or(state.default_count);
    let criteria = request.criteria();

    tracing::info!(
        request_id = %request_id,
        mood = ?criteria.mood,
        genres = ?criteria.genres,
        occasion = ?criteria.occasion,
        age = ?criteria.age,
        categories = ?criteria.categories,
        unfiltered = criteria.is_unfiltered(),
        count,
        "Processing recommendation request"
    );

    // Only seeding the per-request generator happens under the lock
    let mut rng = StdRng::from_rng(&mut *state.rng.lock().await)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let recommendation = state.recommender.recommend(&criteria, count, &mut rng);

    tracing::info!(
        request_id = %request_id,
        returned = recommendation.ids().len(),
        none_available = recommendation.is_none_available(),
        "Recommendation completed"
    );

    Ok(Json(recommendation))
}
