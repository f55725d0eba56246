use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendationRequest, RecommendationsResponse},
    routes::AppState,
    services::recommendations,
};

/// Handler for the recommendations endpoint
///
/// Body problems are reported through the same failure envelope as every other error
/// instead of axum's default rejection response.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationsResponse>> {
    let Json(request) =
        payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    let movie_title = request
        .title_text()
        .ok_or_else(|| AppError::InvalidInput("Movie title is required".to_string()))?;

    tracing::info!(
        request_id = %request_id,
        movie_title = %movie_title,
        "Processing recommendation request"
    );

    let recommendations =
        recommendations::generate_recommendations(state.provider.clone(), &movie_title).await?;

    tracing::info!(
        request_id = %request_id,
        count = recommendations.len(),
        "Recommendations completed"
    );

    Ok(Json(RecommendationsResponse { recommendations }))
}
