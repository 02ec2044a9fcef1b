use std::env;
use tracing::warn;

pub const DEFAULT_SLOT_MINUTES: u32 = 30;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub slot_minutes: u32,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            slot_minutes: DEFAULT_SLOT_MINUTES,
            gemini_api_key: String::new(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            bind_addr: env::var("AROGYA_BIND_ADDR")
                .unwrap_or_else(|_| defaults.bind_addr.clone()),
            slot_minutes: parse_slot_minutes(env::var("AROGYA_SLOT_MINUTES").ok()),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("GEMINI_API_KEY not set, AI endpoints will be unavailable");
                    String::new()
                }),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or(defaults.gemini_model),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or(defaults.gemini_base_url),
        };

        if !config.is_ai_configured() {
            warn!("Application running without AI configuration");
        }

        config
    }

    pub fn is_ai_configured(&self) -> bool {
        !self.gemini_api_key.is_empty() && !self.gemini_base_url.is_empty()
    }
}

fn parse_slot_minutes(raw: Option<String>) -> u32 {
    match raw {
        None => DEFAULT_SLOT_MINUTES,
        Some(value) => match value.trim().parse::<u32>() {
            Ok(minutes) if minutes > 0 => minutes,
            _ => {
                warn!("AROGYA_SLOT_MINUTES={} is not a positive integer, using {}", value, DEFAULT_SLOT_MINUTES);
                DEFAULT_SLOT_MINUTES
            }
        },
    }
}
