use common::DEFAULT_PRINT_DELAY_MS;
use log::Level;
use web_sys::window;

/// localStorage key prefix for all persisted settings
const STORAGE_PREFIX: &str = "bloodcast_";

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Backend API host (e.g., "localhost" or "api.example.com")
    pub api_host: String,

    /// Backend API port (e.g., 8000)
    pub api_port: u16,

    /// Use HTTPS for API requests
    pub api_use_https: bool,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,

    /// Delay before the print dialog opens on the report print window
    pub print_delay_ms: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "localhost".to_string(),
            api_port: 8000,
            api_use_https: false,
            log_level: Level::Info,
            debug_mode: false,
            toast_duration_ms: 5000,
            print_delay_ms: DEFAULT_PRINT_DELAY_MS,
        }
    }
}

/// Parses a log level name as stored in localStorage.
pub fn parse_log_level(value: &str) -> Option<Level> {
    match value.trim().to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

fn storage_key(name: &str) -> String {
    format!("{}{}", STORAGE_PREFIX, name)
}

impl AppSettings {
    /// Create settings from environment/window location
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

            // In development, use more verbose logging
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            } else if !hostname.is_empty() {
                // Deployed next to the API
                settings.api_host = hostname;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            let read = |name: &str| storage.get_item(&storage_key(name)).ok().flatten();

            if let Some(api_host) = read("api_host") {
                settings.api_host = api_host;
            }
            if let Some(port) = read("api_port").and_then(|v| v.parse::<u16>().ok()) {
                settings.api_port = port;
            }
            if let Some(use_https) = read("api_use_https") {
                settings.api_use_https = use_https.eq_ignore_ascii_case("true");
            }
            if let Some(level) = read("log_level").as_deref().and_then(parse_log_level) {
                settings.log_level = level;
            }
            if let Some(duration) = read("toast_duration_ms").and_then(|v| v.parse::<u32>().ok()) {
                settings.toast_duration_ms = duration;
            }
            if let Some(delay) = read("print_delay_ms").and_then(|v| v.parse::<u32>().ok()) {
                settings.print_delay_ms = delay;
            }
        }

        settings
    }

    /// Get the base API URL (protocol + host + port)
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!("{}://{}:{}", protocol, self.api_host, self.api_port)
    }

    /// Get the full API URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url(), endpoint)
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_urls() {
        let settings = AppSettings::default();

        assert_eq!(settings.api_base_url(), "http://localhost:8000");
        assert_eq!(settings.api_url("/api/forecasts"), "http://localhost:8000/api/forecasts");

        let secure = AppSettings {
            api_host: "blood.example.com".to_string(),
            api_port: 443,
            api_use_https: true,
            ..AppSettings::default()
        };
        assert_eq!(secure.api_url("/chat"), "https://blood.example.com:443/chat");
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("DEBUG"), Some(Level::Debug));
        assert_eq!(parse_log_level(" warn "), Some(Level::Warn));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_storage_keys_are_prefixed() {
        assert_eq!(storage_key("api_host"), "bloodcast_api_host");
        assert_eq!(AppSettings::default().print_delay_ms, 500);
    }
}
