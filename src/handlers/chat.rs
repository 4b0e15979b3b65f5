use axum::{extract::State, response::Json};
use common::{ChatRequest, ChatResponse};
use compute::context;
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::schemas::AppState;

/// Answer a question about one segment
#[utoipa::path(
    post,
    path = "/chat",
    tag = "analysis",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer generated", body = ChatResponse),
        (status = 400, description = "Empty message or invalid segment", body = common::ErrorResponse),
        (status = 404, description = "No data for the segment", body = common::ErrorResponse),
        (status = 502, description = "Language model call failed", body = common::ErrorResponse),
        (status = 503, description = "Language model not configured", body = common::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(region = %request.region, blood_type = %request.blood_type, month = request.month))]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message must not be empty".to_string()));
    }

    let segment = context::collect(
        &state.dataset,
        &request.region,
        request.blood_type,
        request.month,
    )?;
    let prompt = context::chat_prompt(&segment, message);

    let response = state.model.complete(&prompt).await?;
    debug!("Chat answer of {} characters", response.chars().count());

    Ok(Json(ChatResponse { response }))
}
