use crate::api_client;
use common::{ChatRequest, ChatResponse};

pub async fn send_chat(request: &ChatRequest) -> Result<String, String> {
    log::debug!(
        "Sending chat message for {} {} (month {})",
        request.region, request.blood_type, request.month
    );
    let result = api_client::post::<ChatResponse, _>("/chat", request).await;

    if let Err(ref e) = result {
        log::error!("Chat request failed: {}", e);
    }

    result.map(|r| r.response)
}
