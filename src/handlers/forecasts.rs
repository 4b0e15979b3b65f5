use axum::{
    extract::{Query, State},
    response::Json,
};
use common::{BloodTypesResponse, ForecastsResponse, RegionsResponse};
use tracing::{debug, instrument};

use crate::schemas::{AppState, ForecastsQuery};

/// List shortage forecasts for every region, blood type and horizon
#[utoipa::path(
    get,
    path = "/api/forecasts",
    tag = "forecasts",
    params(ForecastsQuery),
    responses(
        (status = 200, description = "Forecasts retrieved successfully", body = ForecastsResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecasts(
    State(state): State<AppState>,
    Query(query): Query<ForecastsQuery>,
) -> Json<ForecastsResponse> {
    let include_all = query.include_all.unwrap_or(true);
    let forecasts = state.dataset.forecasts(include_all);
    debug!("Returning {} forecasts (include_all={})", forecasts.len(), include_all);

    Json(ForecastsResponse {
        forecasts,
        last_date: state.dataset.last_date().format("%Y-%m-%d").to_string(),
        total_regions: state.dataset.regions().len(),
        total_blood_types: state.dataset.blood_types().len(),
    })
}

/// List regions present in the dataset
#[utoipa::path(
    get,
    path = "/api/regions",
    tag = "forecasts",
    responses(
        (status = 200, description = "Regions retrieved successfully", body = RegionsResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_regions(State(state): State<AppState>) -> Json<RegionsResponse> {
    Json(RegionsResponse {
        regions: state.dataset.regions().to_vec(),
    })
}

/// List blood types present in the dataset
#[utoipa::path(
    get,
    path = "/api/bloodtypes",
    tag = "forecasts",
    responses(
        (status = 200, description = "Blood types retrieved successfully", body = BloodTypesResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_blood_types(State(state): State<AppState>) -> Json<BloodTypesResponse> {
    Json(BloodTypesResponse {
        blood_types: state.dataset.blood_types().to_vec(),
    })
}
