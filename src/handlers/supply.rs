use axum::{extract::State, response::Json};
use common::{SupplySuggestionRequest, SupplySuggestionResponse};
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::schemas::AppState;

/// Suggest source regions covering a forecast shortage
#[utoipa::path(
    post,
    path = "/api/supply-suggestion",
    tag = "supply",
    request_body = SupplySuggestionRequest,
    responses(
        (status = 200, description = "Supply suggestion computed", body = SupplySuggestionResponse),
        (status = 400, description = "Invalid region, blood type or month", body = common::ErrorResponse),
        (status = 404, description = "No data for the segment", body = common::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_supply_suggestion(
    State(state): State<AppState>,
    Json(request): Json<SupplySuggestionRequest>,
) -> Result<Json<SupplySuggestionResponse>, ApiError> {
    let cache_key = format!("supply_{}_{}_{}", request.region, request.blood_type, request.month);

    if let Some(cached) = state.cache.get(&cache_key).await {
        debug!("Supply suggestion served from cache");
        return Ok(Json(cached));
    }

    let response = compute::supply::suggest(
        &state.dataset,
        &request.region,
        request.blood_type,
        request.month,
    )?;

    state.cache.insert(cache_key, response.clone()).await;

    Ok(Json(response))
}
