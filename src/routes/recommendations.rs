use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{RecommendationPage, RecommendationRequest, RecommendedShowView},
    routes::AppState,
};

/// Handler for recommendations endpoint
///
/// Asks the recommender for one item beyond the page size to learn whether
/// another page exists, then trims it before responding.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationPage>> {
    let (page, limit, offset) = request.pagination()?;

    tracing::info!(
        request_id = %request_id,
        seed_count = request.shows.len(),
        page,
        limit,
        "Processing recommendation request"
    );

    let limit = limit as usize;
    let mut recommendations = state
        .recommender
        .execute(&request.shows, limit + 1, offset as usize)
        .await?;

    let has_more = recommendations.len() > limit;
    recommendations.truncate(limit);

    tracing::info!(
        request_id = %request_id,
        returned = recommendations.len(),
        has_more,
        "Recommendations served"
    );

    Ok(Json(RecommendationPage {
        shows: recommendations.iter().map(RecommendedShowView::from).collect(),
        has_more,
        page,
    }))
}
