use std::fmt;
use std::sync::Arc;

use common::{
    AnalyzeRequest, AnalyzeResponse, BloodType, BloodTypesResponse, ChatRequest, ChatResponse,
    ErrorResponse, ForecastsResponse, RegionsResponse, ShortageForecast, SupplySuggestion,
    SupplySuggestionRequest, SupplySuggestionResponse,
};
use compute::ForecastDataset;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::llm::LanguageModel;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Precomputed forecasts, immutable after startup
    pub dataset: Arc<ForecastDataset>,
    /// Backend for reports and chat
    pub model: Arc<dyn LanguageModel>,
    /// Supply suggestions keyed by region, blood type and month
    pub cache: Cache<String, SupplySuggestionResponse>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("series", &self.dataset.series_count())
            .field("model", &self.model.describe())
            .field("cached", &self.cache.entry_count())
            .finish()
    }
}

/// Query parameters for the forecast listing
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ForecastsQuery {
    /// Include segments whose severity is 정상 (default: true)
    pub include_all: Option<bool>,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Loaded dataset summary
    pub dataset: String,
    /// Language model status
    pub language_model: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::forecasts::get_forecasts,
        crate::handlers::forecasts::get_regions,
        crate::handlers::forecasts::get_blood_types,
        crate::handlers::supply::get_supply_suggestion,
        crate::handlers::analysis::analyze,
        crate::handlers::chat::chat,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            ForecastsQuery,
            ForecastsResponse,
            ShortageForecast,
            BloodType,
            RegionsResponse,
            BloodTypesResponse,
            SupplySuggestionRequest,
            SupplySuggestion,
            SupplySuggestionResponse,
            AnalyzeRequest,
            AnalyzeResponse,
            ChatRequest,
            ChatResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "forecasts", description = "Blood shortage forecast endpoints"),
        (name = "supply", description = "Inter-region supply suggestion endpoints"),
        (name = "analysis", description = "AI report and chat endpoints"),
    ),
    info(
        title = "Bloodcast API",
        description = "Blood supply shortage forecasts per region and blood type, with supply suggestions and AI analysis",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
