//! Common transport-layer types shared between backend and frontend.
//! These structs mirror the backend handlers' request/response payloads
//! so the frontend can deserialize API responses without duplicating shapes.
//!
//! The presentation state used by the dashboard and chat pages also lives
//! here, free of any browser dependency, so it can be unit tested natively.

pub mod chat;
pub mod forecast;
pub mod panel;
pub mod ranking;
pub mod report;
pub mod request;
pub mod supply;

pub use chat::{
    CHAT_FAILURE_MESSAGE, ChatMessage, ChatQuery, ChatRequest, ChatResponse, ChatRole, ChatSession,
    ChatValidationError, PendingChat, prefill_question,
};
pub use forecast::{
    BloodType, BloodTypesResponse, FORECAST_HORIZONS, ForecastsResponse, RegionsResponse, Severity,
    ShortageForecast, UnknownBloodType, is_valid_horizon,
};
pub use panel::{DetailPanel, ReportJob, ReportState, SupplyJob, SupplyState};
pub use ranking::{
    HorizonGroups, UNKNOWN_SEVERITY_RANK, group_by_horizon, severity_counts, severity_rank,
    sort_by_severity,
};
pub use report::{
    AnalyzeRequest, AnalyzeResponse, DEFAULT_PRINT_DELAY_MS, PRINT_STYLESHEET, PrintHeader,
    REPORT_FAILURE_MESSAGE, SCREEN_BLOCK_STYLES, markdown_to_html, print_document,
    screen_stylesheet,
};
pub use request::{RequestToken, RequestTracker};
pub use supply::{
    SupplySuggestion, SupplySuggestionRequest, SupplySuggestionResponse, SupplyView,
    fulfillment_percent,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by every failing backend endpoint.
/// Note: The backend converts its `ApiError` into this shape; the frontend
/// reads `error` to show a readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success flag (always false)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            success: false,
        }
    }
}
