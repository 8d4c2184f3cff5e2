use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::ShowView,
    routes::AppState,
    services::show_search,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    query: String,
}

/// Handler for show search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<ShowView>>> {
    tracing::debug!(request_id = %request_id, query = %params.query, "Processing show search");

    let shows = show_search::search_shows(state.catalog.as_ref(), &params.query).await?;
    Ok(Json(shows.iter().map(ShowView::from).collect()))
}
