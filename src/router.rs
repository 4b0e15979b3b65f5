use crate::handlers::{
    analysis::analyze,
    chat::chat,
    forecasts::{get_blood_types, get_forecasts, get_regions},
    health::health_check,
    supply::get_supply_suggestion,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Report generation can take a while on the language model side.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Forecast data
        .route("/api/forecasts", get(get_forecasts))
        .route("/api/regions", get(get_regions))
        .route("/api/bloodtypes", get(get_blood_types))
        .route("/api/supply-suggestion", post(get_supply_suggestion))
        // Language model
        .route("/analyze", post(analyze))
        .route("/chat", post(chat))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
