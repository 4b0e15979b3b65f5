use crate::api_client;
use common::{SupplySuggestionRequest, SupplySuggestionResponse};

pub async fn get_supply_suggestion(
    request: &SupplySuggestionRequest,
) -> Result<SupplySuggestionResponse, String> {
    log::trace!("Fetching supply suggestion for {} {}", request.region, request.blood_type);
    let result =
        api_client::post::<SupplySuggestionResponse, _>("/api/supply-suggestion", request).await;

    match &result {
        Ok(response) => log::info!(
            "Supply suggestion: {} sources, {:.2} of {:.2}",
            response.suggestions.len(),
            response.total_suggested,
            response.shortage_amount
        ),
        Err(e) => log::error!("Failed to fetch supply suggestion: {}", e),
    }

    result
}
