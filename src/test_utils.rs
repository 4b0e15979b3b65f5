#[cfg(test)]
pub mod test_utils {
    use crate::llm::{LanguageModel, LlmError, UnconfiguredModel};
    use crate::router::create_router;
    use crate::schemas::AppState;
    use async_trait::async_trait;
    use axum::Router;
    use compute::context::Prompt;
    use compute::ForecastDataset;
    use moka::future::Cache;
    use std::sync::{Arc, Mutex};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Small dataset used by the integration tests.
    ///
    /// 부산 O is 심각 in month 1 (-50%), 주의 in month 2 and 정상 in month 3.
    /// 울산, 경남 and 서울중앙 have a surplus in month 1, 제주 a large one that
    /// must never be suggested. 부산 A has no month 2 forecast.
    pub const TEST_DATASET: &str = r#"{
        "lastDate": "2024-12-01",
        "series": [
            {"region": "부산", "bloodType": "O", "history": [100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100], "forecasts": [50, 75, 95]},
            {"region": "울산", "bloodType": "O", "history": [100], "forecasts": [130, 100, 100]},
            {"region": "경남", "bloodType": "O", "history": [100], "forecasts": [110, 92, 100]},
            {"region": "서울중앙", "bloodType": "O", "history": [200], "forecasts": [260, 200, 200]},
            {"region": "제주", "bloodType": "O", "history": [100], "forecasts": [300, 100, 100]},
            {"region": "부산", "bloodType": "A", "history": [100], "forecasts": [100, null]}
        ]
    }"#;

    /// Language model returning a fixed answer and recording the prompts it saw.
    #[derive(Default)]
    pub struct ScriptedModel {
        pub answer: String,
        pub prompts: Mutex<Vec<Prompt>>,
    }

    impl ScriptedModel {
        pub fn new(answer: &str) -> Self {
            Self {
                answer: answer.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn last_prompt(&self) -> Option<Prompt> {
            self.prompts.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.clone());
            Ok(self.answer.clone())
        }

        fn describe(&self) -> String {
            "scripted".to_string()
        }
    }

    /// Language model whose upstream always fails.
    pub struct FailingModel;

    #[async_trait]
    impl LanguageModel for FailingModel {
        async fn complete(&self, _prompt: &Prompt) -> Result<String, LlmError> {
            Err(LlmError::Status {
                status: 500,
                body: "upstream exploded".to_string(),
            })
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    pub fn test_dataset() -> ForecastDataset {
        ForecastDataset::from_json_str(TEST_DATASET).expect("Failed to parse test dataset")
    }

    /// Create AppState for testing
    pub fn setup_test_app_state(model: Arc<dyn LanguageModel>) -> AppState {
        AppState {
            dataset: Arc::new(test_dataset()),
            model,
            cache: Cache::new(100),
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing with the given language model
    pub fn setup_test_app_with_model(model: Arc<dyn LanguageModel>) -> Router {
        let _guard = init_test_tracing();
        create_router(setup_test_app_state(model))
    }

    /// Create axum app for testing without a language model
    pub fn setup_test_app() -> Router {
        setup_test_app_with_model(Arc::new(UnconfiguredModel))
    }
}
