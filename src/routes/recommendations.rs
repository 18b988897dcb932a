use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{ProductContext, RecommendationResult, SourceTag, UserProfile},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub product: ProductContext,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendationResult>,
    pub source: SourceTag,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let limit = request.limit.unwrap_or(state.default_limit);
    if limit > state.max_limit {
        return Err(AppError::InvalidInput(format!(
            "limit must be at most {}",
            state.max_limit
        )));
    }

    tracing::info!(
        request_id = %request_id,
        product_id = %request.product.id,
        limit = limit,
        "Processing recommendation request"
    );

    let catalog = state.catalog.catalog().await?;

    let resolution = state
        .recommender
        .resolve_detailed(&request.product, &catalog, &request.profile, limit)
        .await;

    Ok(Json(RecommendationResponse {
        recommendations: resolution.recommendations,
        source: resolution.source,
    }))
}
