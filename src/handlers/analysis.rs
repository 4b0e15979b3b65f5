use axum::{extract::State, response::Json};
use common::{AnalyzeRequest, AnalyzeResponse};
use compute::context;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::schemas::AppState;

/// Generate an AI analysis report for one segment
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Report generated", body = AnalyzeResponse),
        (status = 400, description = "Invalid region, blood type or month", body = common::ErrorResponse),
        (status = 404, description = "No data for the segment", body = common::ErrorResponse),
        (status = 502, description = "Language model call failed", body = common::ErrorResponse),
        (status = 503, description = "Language model not configured", body = common::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let segment = context::collect(
        &state.dataset,
        &request.region,
        request.blood_type,
        request.month,
    )?;
    let prompt = context::report_prompt(&segment);

    let report = state.model.complete(&prompt).await?;
    info!("Generated report of {} characters", report.chars().count());

    Ok(Json(AnalyzeResponse {
        report,
        region: request.region,
        blood_type: request.blood_type,
        month: request.month,
    }))
}
