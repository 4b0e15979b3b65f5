use crate::api_client;
use common::{AnalyzeRequest, AnalyzeResponse};

/// Asks the backend for a narrative report. Returns the markdown source.
pub async fn analyze(request: &AnalyzeRequest) -> Result<String, String> {
    log::info!(
        "Requesting report for {} {} ({} months ahead)",
        request.region, request.blood_type, request.month
    );
    let result = api_client::post::<AnalyzeResponse, _>("/analyze", request).await;

    if let Err(ref e) = result {
        log::error!("Failed to generate report: {}", e);
    }

    result.map(|r| r.report)
}
