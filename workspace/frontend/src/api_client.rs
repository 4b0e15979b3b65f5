pub mod analysis;
pub mod chat;
pub mod forecast;
pub mod supply;

use common::ErrorResponse;
use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};
use crate::settings;

fn api_url(endpoint: &str) -> String {
    settings::get_settings().api_url(endpoint)
}

/// Turns a non-OK response into a readable message, preferring the
/// backend's `error` field.
async fn error_message(method: &str, endpoint: &str, response: Response) -> String {
    log::warn!("{} {} - Non-OK response: {}", method, endpoint, response.status());
    match response.json::<ErrorResponse>().await {
        Ok(err) => {
            log::error!("{} {} - API error [{}]: {}", method, endpoint, err.code, err.error);
            err.error
        }
        Err(_) => {
            let error_msg = format!("HTTP error: {}", response.status());
            log::error!("{} {} - {}", method, endpoint, error_msg);
            error_msg
        }
    }
}

async fn parse_body<T>(method: &str, endpoint: &str, response: Response) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    log::trace!("{} {} - Response received, parsing JSON", method, endpoint);
    let body = response.json::<T>().await.map_err(|e| {
        let error_msg = format!("Failed to parse response: {}", e);
        log::error!("{} {} - {}", method, endpoint, error_msg);
        error_msg
    })?;

    log::info!("{} {} - Success", method, endpoint);
    Ok(body)
}

/// Common GET request handler
pub async fn get<T>(endpoint: &str) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    let url = api_url(endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url).send().await.map_err(|e| {
        let error_msg = format!("Request failed: {}", e);
        log::error!("GET {} - {}", endpoint, error_msg);
        error_msg
    })?;

    if !response.ok() {
        return Err(error_message("GET", endpoint, response).await);
    }

    parse_body("GET", endpoint, response).await
}

/// Common POST request handler
pub async fn post<T, B>(endpoint: &str, body: &B) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
    B: Serialize,
{
    let url = api_url(endpoint);
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url)
        .json(body)
        .map_err(|e| {
            let error_msg = format!("Failed to serialize request: {}", e);
            log::error!("POST {} - {}", endpoint, error_msg);
            error_msg
        })?
        .send()
        .await
        .map_err(|e| {
            let error_msg = format!("Request failed: {}", e);
            log::error!("POST {} - {}", endpoint, error_msg);
            error_msg
        })?;

    if !response.ok() {
        return Err(error_message("POST", endpoint, response).await);
    }

    parse_body("POST", endpoint, response).await
}
