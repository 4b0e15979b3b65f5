use crate::api_client;
use common::{BloodTypesResponse, ForecastsResponse, RegionsResponse};

/// Fetches shortage forecasts. Without `include_all` only segments with a
/// shortage alert are returned.
pub async fn get_forecasts(include_all: bool) -> Result<ForecastsResponse, String> {
    log::trace!("Fetching forecasts (include_all={})", include_all);
    let url = format!("/api/forecasts?include_all={}", include_all);
    let result = api_client::get::<ForecastsResponse>(&url).await;

    match &result {
        Ok(response) => log::info!(
            "Fetched {} forecasts (last date {})",
            response.forecasts.len(),
            response.last_date
        ),
        Err(e) => log::error!("Failed to fetch forecasts: {}", e),
    }

    result
}

pub async fn get_regions() -> Result<Vec<String>, String> {
    log::trace!("Fetching regions");
    let result = api_client::get::<RegionsResponse>("/api/regions").await;

    if let Err(ref e) = result {
        log::error!("Failed to fetch regions: {}", e);
    }

    result.map(|r| r.regions)
}

pub async fn get_blood_types() -> Result<BloodTypesResponse, String> {
    log::trace!("Fetching blood types");
    let result = api_client::get::<BloodTypesResponse>("/api/bloodtypes").await;

    if let Err(ref e) = result {
        log::error!("Failed to fetch blood types: {}", e);
    }

    result
}
