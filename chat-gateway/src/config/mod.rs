use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub llm: LlmConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Answer every question locally without calling the provider.
    pub mock_mode: bool,
    /// Provider credential. `None` in live mode makes `/chat` fail with a
    /// configuration error instead of aborting startup.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    /// Base URL of an OpenAI-compatible API, without trailing slash.
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            mock_mode: false,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            otlp_endpoint: None,
        }
    }
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Ok(Self::from_lookup(common_config, |key| env::var(key).ok()))
    }

    /// Build the gateway settings from `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_optional_env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_env =
            |key: &str, default: &str| get_optional_env(key).unwrap_or_else(|| default.to_string());

        GatewayConfig {
            common,
            llm: LlmConfig {
                mock_mode: parse_mock_flag(lookup("MOCK_API").as_deref()),
                api_key: get_optional_env("OPENAI_API_KEY").map(Secret::new),
                model: get_env("OPENAI_MODEL", DEFAULT_MODEL),
                api_base: get_env("OPENAI_API_BASE", DEFAULT_API_BASE)
                    .trim_end_matches('/')
                    .to_string(),
            },
            telemetry: TelemetryConfig {
                log_level: get_env("LOG_LEVEL", "info"),
                otlp_endpoint: get_optional_env("OTLP_ENDPOINT"),
            },
        }
    }
}

/// Only the exact string `"true"` turns mock mode on.
pub fn parse_mock_flag(value: Option<&str>) -> bool {
    value == Some("true")
}
