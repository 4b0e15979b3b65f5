#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::openapi::{schema::Schema, PathItemType, RefOr};
    use utoipa::OpenApi;

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let schema = components
            .schemas
            .get(name)
            .unwrap_or_else(|| panic!("{} schema should be registered", name));

        if let RefOr::T(Schema::Object(obj)) = schema {
            obj.properties.keys().cloned().collect()
        } else {
            panic!("{} should be an object schema", name);
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();
        for name in [
            "ErrorResponse",
            "HealthResponse",
            "ForecastsResponse",
            "ShortageForecast",
            "SupplySuggestionRequest",
            "SupplySuggestionResponse",
            "AnalyzeRequest",
            "AnalyzeResponse",
            "ChatRequest",
            "ChatResponse",
        ] {
            assert!(components.schemas.contains_key(name), "missing schema {}", name);
        }

        assert!(serde_json::to_string(&openapi).is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");

        assert!(properties.contains(&"error".to_string()));
        assert!(properties.contains(&"code".to_string()));
        assert!(properties.contains(&"success".to_string()));
    }

    #[test]
    fn test_health_response_schema_structure() {
        let properties = object_properties("HealthResponse");

        assert!(properties.contains(&"status".to_string()));
        assert!(properties.contains(&"version".to_string()));
        assert!(properties.contains(&"dataset".to_string()));
        assert!(properties.contains(&"languageModel".to_string()));
    }

    #[test]
    fn test_payloads_use_camel_case() {
        let forecast = object_properties("ShortageForecast");
        assert!(forecast.contains(&"bloodType".to_string()));
        assert!(forecast.contains(&"forecastValue".to_string()));

        let supply = object_properties("SupplySuggestionResponse");
        assert!(supply.contains(&"shortageAmount".to_string()));
        assert!(supply.contains(&"totalSuggested".to_string()));
    }

    #[test]
    fn test_paths_and_methods() {
        let openapi = ApiDoc::openapi();
        let expected = [
            ("/health", PathItemType::Get),
            ("/api/forecasts", PathItemType::Get),
            ("/api/regions", PathItemType::Get),
            ("/api/bloodtypes", PathItemType::Get),
            ("/api/supply-suggestion", PathItemType::Post),
            ("/analyze", PathItemType::Post),
            ("/chat", PathItemType::Post),
        ];

        for (path, method) in expected {
            let item = openapi
                .paths
                .paths
                .get(path)
                .unwrap_or_else(|| panic!("{} should be documented", path));
            assert!(item.operations.contains_key(&method), "{} is missing its operation", path);
        }
    }

    #[test]
    fn test_forecasts_query_parameter() {
        let openapi = ApiDoc::openapi();
        let operation = openapi
            .paths
            .paths
            .get("/api/forecasts")
            .and_then(|item| item.operations.get(&PathItemType::Get))
            .unwrap();

        let parameters = operation.parameters.as_ref().unwrap();
        assert!(parameters.iter().any(|p| p.name == "include_all"));
    }
}
